use reqwest::Client;

use crate::types::{Artist, Paging, Track};

use super::get_json;

/// Roughly the last four weeks.
pub const DEFAULT_TIME_RANGE: &str = "short_term";

/// Fetches the current user's most played tracks.
///
/// Needs the `user-top-read` scope.
///
/// # Arguments
///
/// * `api_url` - Base URL of the Web API
/// * `token` - Valid access token
/// * `limit` - Number of tracks, at most 50
/// * `time_range` - `short_term`, `medium_term` or `long_term`
///
/// # Returns
///
/// - `Ok(Vec<Track>)` - Tracks, most played first
/// - `Err(reqwest::Error)` - Network error or non-2xx answer
///
/// # Example
///
/// ```
/// let tracks = get_top_tracks(&client, api_url, token, 10, DEFAULT_TIME_RANGE).await?;
/// ```
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    limit: u32,
    time_range: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let url = format!("{}/me/top/tracks", api_url.trim_end_matches('/'));
    let res: Paging<Track> = get_json(client, &url, token, &top_query(limit, time_range)).await?;
    Ok(res.items)
}

/// Fetches the current user's most played artists.
///
/// Same arguments and scope as [`get_top_tracks`].
///
/// # Returns
///
/// - `Ok(Vec<Artist>)` - Artists, most played first
/// - `Err(reqwest::Error)` - Network error or non-2xx answer
pub async fn get_top_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    limit: u32,
    time_range: &str,
) -> Result<Vec<Artist>, reqwest::Error> {
    let url = format!("{}/me/top/artists", api_url.trim_end_matches('/'));
    let res: Paging<Artist> = get_json(client, &url, token, &top_query(limit, time_range)).await?;
    Ok(res.items)
}

fn top_query(limit: u32, time_range: &str) -> [(&'static str, String); 2] {
    [
        ("limit", limit.to_string()),
        ("time_range", time_range.to_string()),
    ]
}

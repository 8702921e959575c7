use reqwest::Client;

use crate::types::{Artist, ArtistTopTracksResponse, SearchArtistsResponse, Track};

use super::get_json;

/// Searches artists by name and returns the best match, if any.
///
/// # Arguments
///
/// * `api_url` - Base URL of the Web API, e.g. `https://api.spotify.com/v1`
/// * `token` - Valid access token
/// * `name` - Free-text artist name
///
/// # Returns
///
/// - `Ok(Some(Artist))` - First search hit
/// - `Ok(None)` - Nothing matched
/// - `Err(reqwest::Error)` - Network error or non-2xx answer
///
/// # Example
///
/// ```
/// let artist = search_artist(&client, "https://api.spotify.com/v1", token, "Tove Lo").await?;
/// ```
pub async fn search_artist(
    client: &Client,
    api_url: &str,
    token: &str,
    name: &str,
) -> Result<Option<Artist>, reqwest::Error> {
    let url = format!("{}/search", api_url.trim_end_matches('/'));
    let res: SearchArtistsResponse = get_json(
        client,
        &url,
        token,
        &[
            ("q", name.to_string()),
            ("type", "artist".to_string()),
            ("limit", "1".to_string()),
        ],
    )
    .await?;

    Ok(res.artists.items.into_iter().next())
}

/// Top tracks of an artist in the given market (ISO 3166-1 alpha-2).
pub async fn get_artist_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
    market: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let url = format!(
        "{uri}/artists/{id}/top-tracks",
        uri = api_url.trim_end_matches('/'),
        id = artist_id
    );
    let res: ArtistTopTracksResponse =
        get_json(client, &url, token, &[("market", market.to_string())]).await?;

    Ok(res.tracks)
}

use reqwest::Client;

use crate::types::{Album, NewReleasesResponse};

use super::get_json;

/// Retrieves the newest album releases featured in a country.
///
/// # Arguments
///
/// * `api_url` - Base URL of the Web API
/// * `token` - Valid access token
/// * `country` - ISO 3166-1 alpha-2 country code, e.g. `US`
/// * `limit` - Number of albums (1-50)
///
/// # Returns
///
/// - `Ok(Vec<Album>)` - Albums in the order the API returns them
/// - `Err(reqwest::Error)` - Network error or non-2xx answer
pub async fn get_new_releases(
    client: &Client,
    api_url: &str,
    token: &str,
    country: &str,
    limit: u32,
) -> Result<Vec<Album>, reqwest::Error> {
    let url = format!("{}/browse/new-releases", api_url.trim_end_matches('/'));
    let res: NewReleasesResponse = get_json(
        client,
        &url,
        token,
        &[("country", country.to_string()), ("limit", limit.to_string())],
    )
    .await?;

    Ok(res.albums.items)
}

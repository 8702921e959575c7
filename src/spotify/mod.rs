//! # Spotify Integration Module
//!
//! Thin calls against the Spotify Web API used by the dashboard commands.
//! Every call takes the API base URL (normally `https://api.spotify.com/v1`)
//! and a bearer access token; authentication itself lives in
//! [`crate::oauth`] and token upkeep in [`crate::management`].
//!
//! ## Endpoints
//!
//! - `GET /search?type=artist` - [`artists::search_artist`]
//! - `GET /artists/{id}/top-tracks` - [`artists::get_artist_top_tracks`]
//! - `GET /browse/new-releases` - [`releases::get_new_releases`]
//! - `GET /me/top/tracks`, `GET /me/top/artists` - [`top`]
//!
//! ## Rate Limiting
//!
//! A `429 Too Many Requests` answer is retried once after the `Retry-After`
//! delay when that delay is at most two minutes. Every other non-2xx status
//! is returned as a `reqwest::Error`.

pub mod artists;
pub mod releases;
pub mod top;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::warning;

pub const MAX_RETRY_AFTER_SECS: u64 = 120;

/// GETs `url` with `query` and decodes the JSON body.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
    query: &[(&str, String)],
) -> Result<T, reqwest::Error> {
    let mut retried = false;

    loop {
        let response = client.get(url).query(query).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS && !retried {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0);
            if retry_after <= MAX_RETRY_AFTER_SECS {
                retried = true;
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Try again later.",
                retry_after
            );
        }

        return response.error_for_status()?.json::<T>().await;
    }
}

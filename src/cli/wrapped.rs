use reqwest::Client;

use crate::{
    config, error,
    spotify::top::{DEFAULT_TIME_RANGE, get_top_artists, get_top_tracks},
    utils,
};

use super::auth::{ensure_access_token, load_config};

/// Prints the user's top tracks and top artists of the short-term range.
pub async fn wrapped(limit: u32) {
    let auth = load_config();
    let client = Client::new();
    let token = ensure_access_token(&auth, &client).await;
    let api_url = config::spotify_api_url();

    let tracks = match get_top_tracks(&client, &api_url, &token, limit, DEFAULT_TIME_RANGE).await {
        Ok(t) => t,
        Err(e) => error!("Error retrieving top tracks. Err: {}", e),
    };
    let artists = match get_top_artists(&client, &api_url, &token, limit, DEFAULT_TIME_RANGE).await
    {
        Ok(a) => a,
        Err(e) => error!("Error retrieving top artists. Err: {}", e),
    };

    print!("{}", utils::format_wrapped(&tracks, &artists));
}

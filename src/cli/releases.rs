use reqwest::Client;

use crate::{config, error, info, spotify::releases::get_new_releases, utils};

use super::auth::{ensure_access_token, load_config};

/// Prints the newest album releases of `country`.
pub async fn new_releases(country: String, limit: u32) {
    let auth = load_config();
    let client = Client::new();
    let token = ensure_access_token(&auth, &client).await;

    let releases =
        match get_new_releases(&client, &config::spotify_api_url(), &token, &country, limit).await
        {
            Ok(r) => r,
            Err(e) => error!("Error retrieving new releases. Err: {}", e),
        };

    if releases.is_empty() {
        info!("No new releases found for {}.", country);
        return;
    }

    info!("Check out new releases:");
    print!("{}", utils::format_new_releases(&releases));
}

use reqwest::Client;
use tabled::Table;

use crate::{
    config, error, info,
    spotify::artists::{get_artist_top_tracks, search_artist},
    utils,
};

use super::auth::{ensure_access_token, load_config};

/// Looks up the best-matching artist and prints their top tracks.
pub async fn search(artist_name: String, market: String) {
    let auth = load_config();
    let client = Client::new();
    let token = ensure_access_token(&auth, &client).await;
    let api_url = config::spotify_api_url();

    let artist = match search_artist(&client, &api_url, &token, &artist_name).await {
        Ok(Some(artist)) => artist,
        Ok(None) => {
            info!("No results found for {}.", artist_name);
            return;
        }
        Err(e) => error!("Error searching for artist. Err: {}", e),
    };

    let tracks = match get_artist_top_tracks(&client, &api_url, &token, &artist.id, &market).await
    {
        Ok(t) => t,
        Err(e) => error!("Error retrieving top tracks of {}. Err: {}", artist.name, e),
    };

    if tracks.is_empty() {
        info!("No songs found for {}.", artist_name);
        return;
    }

    info!("Songs by {}:", artist.name);
    println!("{}", Table::new(utils::track_table_rows(&tracks)));
}

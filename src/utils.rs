use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Album, Artist, SimpleArtist, Track, TrackTableRow};

pub const STATE_LENGTH: usize = 32;
pub const CODE_VERIFIER_LENGTH: usize = 128;

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random value sent as `state` and checked again on the redirect.
pub fn generate_state() -> String {
    random_alphanumeric(STATE_LENGTH)
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(CODE_VERIFIER_LENGTH)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Drops repeated entries while keeping the first occurrence order.
pub fn dedup_ordered<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}

pub fn join_artist_names(artists: &[SimpleArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the "wrapped" summary: numbered top tracks followed by numbered
/// top artists.
pub fn format_wrapped(tracks: &[Track], artists: &[Artist]) -> String {
    let mut out = String::from("Your Spotify Wrapped Data:\n\nTop Tracks:\n");
    for (i, track) in tracks.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} by {}\n",
            i + 1,
            track.name,
            join_artist_names(&track.artists)
        ));
    }

    out.push_str("\nTop Artists:\n");
    for (i, artist) in artists.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, artist.name));
    }
    out
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artists: join_artist_names(&t.artists),
        })
        .collect()
}

/// One `- Name` line per album, in the order the API returned them.
pub fn format_new_releases(albums: &[Album]) -> String {
    albums
        .iter()
        .map(|a| format!("- {}\n", a.name))
        .collect()
}

//! Configuration management for spotdash.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the local data directory. Required credentials are reported as
//! errors instead of panicking so the CLI can tell the user what is missing.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8889/callback";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-top-read user-library-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The parent directory is created when missing. A missing `.env` file is not
/// an error: everything can be provided through the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotdash/.env`
/// - macOS: `~/Library/Application Support/spotdash/.env`
/// - Windows: `%LOCALAPPDATA%/spotdash/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Platform local data directory for spotdash, e.g. `~/.local/share/spotdash`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdash");
    path
}

/// Returns the client ID registered with the Spotify developer dashboard.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the client secret registered with the Spotify developer dashboard.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Result<String, String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the loopback redirect URI, e.g. `http://localhost:8889/callback`.
///
/// This must match the redirect URI registered in the Spotify application
/// settings.
pub fn spotify_redirect_uri() -> String {
    optional("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space-delimited scope string requested during login.
pub fn spotify_scope() -> String {
    optional("SPOTIFY_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_auth_url() -> String {
    optional("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_token_url() -> String {
    optional("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_api_url() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Seconds to wait for the browser redirect before giving up.
pub fn callback_timeout() -> Duration {
    let secs = env::var("SPOTDASH_CALLBACK_TIMEOUT")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_CALLBACK_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

pub fn use_pkce() -> bool {
    env::var("SPOTDASH_USE_PKCE")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", key)),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Everything the authorization handshake needs, resolved once per process.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub callback_timeout: Duration,
    pub use_pkce: bool,
}

impl AuthConfig {
    /// Builds the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required variable.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            redirect_uri: spotify_redirect_uri(),
            scopes: spotify_scope()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            auth_url: spotify_auth_url(),
            token_url: spotify_token_url(),
            callback_timeout: callback_timeout(),
            use_pkce: use_pkce(),
        })
    }
}

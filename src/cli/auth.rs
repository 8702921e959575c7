use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::AuthConfig,
    error, info,
    management::SessionManager,
    oauth::{AuthorizationCoordinator, LoginError},
    success, warning,
};

/// Runs the interactive login and caches the resulting session.
///
/// The authorization URL is opened in the default browser; a spinner runs
/// until the redirect arrives or the callback timeout elapses.
pub async fn login() {
    let config = load_config();
    let manager = login_with(&config).await;
    success!(
        "Authentication successful! Session valid until {}.",
        manager.session().expires_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
}

/// Deletes the cached session.
pub async fn logout() {
    match SessionManager::clear().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Cannot remove cached session. Err: {}", e),
    }
}

pub(crate) fn load_config() -> AuthConfig {
    match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    }
}

pub(crate) async fn login_with(config: &AuthConfig) -> SessionManager {
    let coordinator = AuthorizationCoordinator::new(config.clone());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for login in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let outcome = coordinator.login().await;
    pb.finish_and_clear();

    let session = match outcome {
        Ok(session) => session,
        Err(e @ LoginError::CallbackTimeout(_)) => {
            error!("{}. Run spotdash login to try again.", e)
        }
        Err(e) => error!("Authentication failed. Err: {}", e),
    };

    let manager = SessionManager::new(session);
    if let Err(e) = manager.persist().await {
        warning!("Failed to save session to cache: {}", e);
    }
    manager
}

/// Returns a usable access token, from the cache if possible, otherwise by
/// logging in.
pub(crate) async fn ensure_access_token(config: &AuthConfig, client: &Client) -> String {
    match SessionManager::load().await {
        Ok(mut manager) => match manager.valid_access_token(client, config).await {
            Ok(token) => return token,
            Err(e) => warning!("Cached session unusable ({}), logging in again", e),
        },
        Err(_) => info!("No cached session, starting login"),
    }

    let manager = login_with(config).await;
    manager.session().access_token().to_string()
}

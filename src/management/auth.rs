use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use reqwest::Client;
use thiserror::Error;

use crate::{
    config::{self, AuthConfig},
    oauth::parse_token_response,
    session::{SessionHandle, expiry_from},
};

/// Refresh this long before the access token actually expires.
pub const REFRESH_MARGIN_SECS: i64 = 240;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session cache is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("session has no refresh token")]
    NoRefreshToken,

    #[error("token refresh failed: {0}")]
    Refresh(String),
}

/// Owns the current [`SessionHandle`] and keeps it usable: loads and stores
/// it in the local cache and refreshes the access token before it expires.
pub struct SessionManager {
    session: SessionHandle,
    path: PathBuf,
}

impl SessionManager {
    pub fn new(session: SessionHandle) -> Self {
        Self::with_path(session, Self::default_path())
    }

    pub fn with_path(session: SessionHandle, path: PathBuf) -> Self {
        SessionManager { session, path }
    }

    pub async fn load() -> Result<Self, SessionError> {
        Self::load_from(Self::default_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, SessionError> {
        let content = async_fs::read_to_string(&path).await?;
        let session: SessionHandle = serde_json::from_str(&content)?;
        Ok(Self { session, path })
    }

    pub async fn persist(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.session)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Removes the cached session file. A missing file is not an error.
    pub async fn clear() -> Result<(), SessionError> {
        Self::clear_at(&Self::default_path()).await
    }

    pub async fn clear_at(path: &Path) -> Result<(), SessionError> {
        match async_fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns an access token that is good for at least the refresh margin,
    /// refreshing (and persisting) first when needed.
    pub async fn valid_access_token(
        &mut self,
        client: &Client,
        config: &AuthConfig,
    ) -> Result<String, SessionError> {
        if self
            .session
            .expires_within(Duration::seconds(REFRESH_MARGIN_SECS), Utc::now())
        {
            refresh_session(client, config, &mut self.session).await?;
            if let Err(e) = self.persist().await {
                tracing::warn!("cannot cache refreshed session: {}", e);
            }
        }

        Ok(self.session.access_token().to_string())
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn default_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/session.json");
        path
    }
}

/// Exchanges the refresh token of `session` for a new access token and swaps
/// it in through [`SessionHandle::replace_token`]. Single attempt.
pub async fn refresh_session(
    client: &Client,
    config: &AuthConfig,
    session: &mut SessionHandle,
) -> Result<(), SessionError> {
    let refresh_token = session
        .refresh_token()
        .ok_or(SessionError::NoRefreshToken)?
        .to_string();

    let res = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| SessionError::Refresh(e.to_string()))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| SessionError::Refresh(e.to_string()))?;
    if !status.is_success() {
        return Err(SessionError::Refresh(format!(
            "token endpoint answered {}: {}",
            status,
            body.trim()
        )));
    }

    let token = parse_token_response(&body).map_err(|e| SessionError::Refresh(e.to_string()))?;
    session.replace_token(
        token.access_token,
        token.refresh_token,
        expiry_from(Utc::now(), token.expires_in),
    );
    Ok(())
}

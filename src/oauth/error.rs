use std::{fmt, io};

use thiserror::Error;

/// Terminal failure of a single `login()` attempt.
///
/// None of these leave shared state behind: the listener socket is released
/// before the error reaches the caller, so a fresh attempt can start at once.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("a login attempt is already in progress")]
    AlreadyInProgress,

    #[error("cannot bind callback listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot open the system browser ({reason}); open this URL manually: {url}")]
    BrowserLaunch { url: String, reason: String },

    #[error("no authorization callback received within {0:?}")]
    CallbackTimeout(std::time::Duration),

    #[error("authorization denied: {error}{}", describe(.description))]
    CallbackDenied {
        error: String,
        description: Option<String>,
    },

    #[error("state returned by the authorization server does not match the request")]
    StateMismatch,

    #[error("callback listener closed before a result was delivered")]
    ListenerClosed,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),
}

/// Copyable tag of a [`LoginError`], kept in [`super::LoginState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Config,
    AlreadyInProgress,
    Bind,
    BrowserLaunch,
    CallbackTimeout,
    CallbackDenied,
    StateMismatch,
    ListenerClosed,
    TokenExchange,
    Cancelled,
}

impl LoginError {
    pub fn kind(&self) -> FailureReason {
        match self {
            LoginError::Config(_) => FailureReason::Config,
            LoginError::AlreadyInProgress => FailureReason::AlreadyInProgress,
            LoginError::Bind { .. } => FailureReason::Bind,
            LoginError::BrowserLaunch { .. } => FailureReason::BrowserLaunch,
            LoginError::CallbackTimeout(_) => FailureReason::CallbackTimeout,
            LoginError::CallbackDenied { .. } => FailureReason::CallbackDenied,
            LoginError::StateMismatch => FailureReason::StateMismatch,
            LoginError::ListenerClosed => FailureReason::ListenerClosed,
            LoginError::TokenExchange(_) => FailureReason::TokenExchange,
        }
    }
}

fn describe(description: &Option<String>) -> String {
    description
        .as_deref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}

impl From<reqwest::Error> for LoginError {
    fn from(err: reqwest::Error) -> Self {
        LoginError::TokenExchange(err.to_string())
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::Config => "config",
            FailureReason::AlreadyInProgress => "already-in-progress",
            FailureReason::Bind => "bind",
            FailureReason::BrowserLaunch => "browser-launch",
            FailureReason::CallbackTimeout => "callback-timeout",
            FailureReason::CallbackDenied => "callback-denied",
            FailureReason::StateMismatch => "state-mismatch",
            FailureReason::ListenerClosed => "listener-closed",
            FailureReason::TokenExchange => "token-exchange",
            FailureReason::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::Utc;
use reqwest::Client;

use crate::{
    api::CallbackResult, config::AuthConfig, server::CallbackListener, session::SessionHandle,
};

use super::{
    AuthorizationRequest, BrowserLauncher, FailureReason, LoginError, SystemBrowser, exchange_code,
};

const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the coordinator is in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    AwaitingCallback,
    ExchangingToken,
    Authenticated,
    Failed(FailureReason),
}

impl LoginState {
    fn is_in_flight(self) -> bool {
        matches!(self, LoginState::AwaitingCallback | LoginState::ExchangingToken)
    }
}

/// Drives the browser-based authorization-code handshake.
///
/// One attempt runs at a time; the state is shared so a concurrent caller
/// is turned away with [`LoginError::AlreadyInProgress`] instead of racing
/// for the callback port.
pub struct AuthorizationCoordinator<B: BrowserLauncher = SystemBrowser> {
    config: AuthConfig,
    browser: B,
    http: Option<Client>,
    state: Arc<Mutex<LoginState>>,
}

impl AuthorizationCoordinator<SystemBrowser> {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_browser(config, SystemBrowser)
    }
}

impl<B: BrowserLauncher> AuthorizationCoordinator<B> {
    pub fn with_browser(config: AuthConfig, browser: B) -> Self {
        Self {
            config,
            browser,
            http: None,
            state: Arc::new(Mutex::new(LoginState::Idle)),
        }
    }

    /// Replaces the HTTP client used for the token exchange. Without one, each
    /// attempt builds a client with a 30 s request timeout.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn state(&self) -> LoginState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one full handshake and returns once it reached a terminal state.
    ///
    /// Starts the callback listener, opens the authorization URL, waits for
    /// the redirect (bounded by the configured callback timeout), then
    /// exchanges the code. The listener is stopped before this returns on
    /// every path; dropping the future mid-attempt stops it as well.
    ///
    /// # Errors
    ///
    /// Any [`LoginError`]; the coordinator then reports
    /// `LoginState::Failed(err.kind())`, except for
    /// [`LoginError::AlreadyInProgress`], which leaves the running attempt
    /// untouched.
    pub async fn login(&self) -> Result<SessionHandle, LoginError> {
        let attempt = Attempt::begin(&self.state)?;

        let outcome = self.run(&attempt).await;
        match &outcome {
            Ok(_) => attempt.finish(LoginState::Authenticated),
            Err(e) => attempt.finish(LoginState::Failed(e.kind())),
        }
        outcome
    }

    fn http_client(&self) -> Result<Client, LoginError> {
        match &self.http {
            Some(client) => Ok(client.clone()),
            None => Client::builder()
                .timeout(TOKEN_REQUEST_TIMEOUT)
                .build()
                .map_err(|e| LoginError::Config(format!("cannot build HTTP client: {}", e))),
        }
    }

    async fn run(&self, attempt: &Attempt) -> Result<SessionHandle, LoginError> {
        let http = self.http_client()?;
        let request = AuthorizationRequest::new(&self.config)?;
        let url = request.authorize_url(&self.config.auth_url)?;

        let mut listener = CallbackListener::start(request.redirect()).await?;

        if let Err(reason) = self.browser.open(&url) {
            listener.stop().await;
            return Err(LoginError::BrowserLaunch { url, reason });
        }

        let callback = listener.await_callback(self.config.callback_timeout).await;
        listener.stop().await;

        let code = match callback? {
            CallbackResult::Authorized { code, state } => {
                if state.as_deref() != Some(request.state()) {
                    return Err(LoginError::StateMismatch);
                }
                code
            }
            CallbackResult::Denied {
                error, description, ..
            } => return Err(LoginError::CallbackDenied { error, description }),
        };

        attempt.advance(LoginState::ExchangingToken);
        let token = exchange_code(&http, &self.config.token_url, &request, &code).await?;

        tracing::debug!(
            expires_in = token.expires_in,
            has_refresh = token.refresh_token.is_some(),
            "token exchange succeeded"
        );
        Ok(SessionHandle::from_token_response(token, Utc::now()))
    }
}

/// In-flight marker for one `login()` call. Finishing records the terminal
/// state; dropping it unfinished records `Failed(Cancelled)`.
struct Attempt {
    state: Arc<Mutex<LoginState>>,
}

impl Attempt {
    fn begin(state: &Arc<Mutex<LoginState>>) -> Result<Self, LoginError> {
        let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
        if current.is_in_flight() {
            return Err(LoginError::AlreadyInProgress);
        }
        *current = LoginState::AwaitingCallback;
        Ok(Self {
            state: Arc::clone(state),
        })
    }

    fn advance(&self, next: LoginState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn finish(self, terminal: LoginState) {
        self.advance(terminal);
    }
}

impl Drop for Attempt {
    fn drop(&mut self) {
        let mut current = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if current.is_in_flight() {
            *current = LoginState::Failed(FailureReason::Cancelled);
        }
    }
}

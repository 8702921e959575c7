//! # OAuth Module
//!
//! Authorization-code handshake against the Spotify accounts service.
//!
//! ## Flow
//!
//! 1. [`AuthorizationRequest`] is built from the [`crate::config::AuthConfig`]
//!    with a fresh random `state` (and a PKCE verifier when enabled)
//! 2. [`crate::server::CallbackListener`] binds the loopback redirect address
//! 3. the authorization URL is handed to a [`BrowserLauncher`]
//! 4. the coordinator parks until the listener delivers the redirect or the
//!    callback timeout elapses
//! 5. the code is exchanged for tokens and a [`crate::session::SessionHandle`]
//!    is returned
//!
//! [`AuthorizationCoordinator::login`] only returns in a terminal state and
//! always stops the listener first, so a failed attempt can be retried right
//! away on the same port.
//!
//! ## Errors
//!
//! Every failure is a [`LoginError`] variant; [`LoginError::kind`] gives the
//! [`FailureReason`] tag recorded in [`LoginState::Failed`].

mod browser;
mod coordinator;
mod error;
mod exchange;
mod request;

pub use browser::{BrowserLauncher, SystemBrowser};
pub use coordinator::{AuthorizationCoordinator, LoginState};
pub use error::{FailureReason, LoginError};
pub use exchange::{exchange_code, parse_token_response};
pub use request::{AuthorizationRequest, RedirectTarget};

mod auth;

pub use auth::{REFRESH_MARGIN_SECS, SessionError, SessionManager, refresh_session};

//! # API Module
//!
//! HTTP handlers mounted by the local callback listener.
//!
//! The listener serves a single route, the redirect path of the configured
//! redirect URI. [`callback`] turns the query string of the redirect into a
//! [`CallbackResult`] and hands it to the waiting login attempt through a
//! [`CallbackSlot`]. Only the first request is delivered; every request,
//! first or not, receives the same static confirmation page.
//!
//! ## Redirect shapes
//!
//! - success: `?code=<code>&state=<state>`
//! - denial/failure: `?error=<code>&error_description=<text>`
//!
//! ## Related Modules
//!
//! - [`crate::server`] - binds the socket and mounts [`callback`]
//! - [`crate::oauth`] - consumes the delivered [`CallbackResult`]

mod callback;

pub use callback::{CONFIRMATION_PAGE, CallbackParams, CallbackResult, CallbackSlot, callback};

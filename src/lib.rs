//! spotdash library
//!
//! A terminal dashboard for the Spotify Web API. The interesting part is the
//! login: a browser-driven OAuth2 authorization-code handshake whose redirect
//! is captured by a short-lived loopback listener and handed back to the
//! waiting caller exactly once.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the OAuth redirect
//! - `cli` - Command implementations (login, wrapped, search, new releases)
//! - `config` - Configuration management and environment variables
//! - `management` - Session cache and token refresh
//! - `oauth` - Authorization request, coordinator and token exchange
//! - `server` - Loopback callback listener
//! - `session` - Authenticated session handle
//! - `spotify` - Spotify Web API calls
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotdash::{config, oauth::AuthorizationCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> spotdash::Res<()> {
//!     config::load_env().await?;
//!     let coordinator = AuthorizationCoordinator::new(config::AuthConfig::from_env()?);
//!     let session = coordinator.login().await?;
//!     assert!(session.is_valid());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod oauth;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spotdash::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Waiting for the browser login...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line to stderr and exits with status 1.
///
/// Only for the command layer: library code returns errors instead.
/// The expansion diverges, so it can stand in for any value in a match arm:
///
/// ```
/// let config = match AuthConfig::from_env() {
///     Ok(c) => c,
///     Err(e) => error!("Cannot load configuration. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line to stderr prefixed with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

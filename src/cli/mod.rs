//! # CLI Module
//!
//! Terminal presentation of the dashboard. Each public function backs one
//! subcommand of the `spotdash` binary, prints its result and terminates the
//! process through [`crate::error!`] on failure.
//!
//! ## Commands
//!
//! - [`login`] - Runs the browser handshake and caches the session
//! - [`logout`] - Discards the cached session
//! - [`wrapped`] - Top tracks and top artists of the last weeks
//! - [`search`] - Top tracks of the best-matching artist
//! - [`new_releases`] - Newest album releases in a country
//!
//! ## Sessions
//!
//! Data commands reuse the cached session when it is still valid or can be
//! refreshed, and fall back to a fresh [`login`] otherwise:
//!
//! ```text
//! cached session ──valid──────────────▶ API call
//!       │ expired
//!       ▼
//! refresh_token grant ──ok────────────▶ API call
//!       │ failed / missing
//!       ▼
//! browser login ──────────────────────▶ API call
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotdash login                         # Authenticate with Spotify
//! spotdash wrapped                       # Top tracks and artists
//! spotdash search "Tove Lo"              # Top tracks of an artist
//! spotdash new-releases --country DE     # Newest releases in Germany
//! spotdash logout                        # Forget the cached session
//! ```

mod artists;
mod auth;
mod releases;
mod wrapped;

pub use artists::search;
pub use auth::login;
pub use auth::logout;
pub use releases::new_releases;
pub use wrapped::wrapped;

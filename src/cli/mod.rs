//! # CLI Module
//!
//! User-facing commands of spotmix. Each function here loads what it needs
//! (token, stores, settings), calls into [`crate::recommend`] or
//! [`crate::spotify`] and prints the result with the colored output macros
//! and `tabled` tables.
//!
//! ## Commands
//!
//! - [`auth`] - OAuth 2.0 PKCE login, stores the token locally
//! - [`set_preference`] / [`show_preference`] - the genre (or `personal_mix`)
//!   recommendations are built for
//! - [`genres`] - canonical genres and their search templates
//! - [`recommend`] - runs the pipeline and replaces the stored list
//! - [`list_recommendations`] - shows the stored list of a session
//! - [`stats`] - top tracks, artists and genres of the last weeks
//!
//! ## Error handling
//!
//! Commands do not return errors. Unrecoverable problems (missing token,
//! revoked access, unreadable stores) end the process through
//! [`error!`](crate::error) with a hint on how to fix them.

mod auth;
mod genres;
mod preference;
mod recommend;
mod stats;

pub use auth::auth;
pub(crate) use auth::connect;
pub use genres::genres;
pub use preference::{set_preference, show_preference};
pub use recommend::{list_recommendations, recommend};
pub use stats::stats;

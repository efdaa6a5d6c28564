//! # API Module
//!
//! HTTP endpoints of the short-lived server started by `spotmix auth`.
//!
//! - [`callback`] - OAuth redirect target, completes the PKCE exchange
//! - [`health`] - status and version, useful when setting up the redirect URI
//!
//! Both are plain axum handlers wired up in [`crate::server`]. State is shared
//! with the waiting auth flow through an `Arc<Mutex<Option<PkceToken>>>`
//! extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;

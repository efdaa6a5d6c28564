//! # Spotify Integration Module
//!
//! The only place that talks HTTP to Spotify.
//!
//! ```text
//! recommend pipeline ──► MusicCatalog ──► SpotifyClient ──► Web API
//! TokenManager ───────► auth::refresh_token ──────────────► Accounts API
//! ```
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh
//! - [`client`] - [`SpotifyClient`], a read-only [`MusicCatalog`](crate::recommend::MusicCatalog)
//!
//! ## Endpoints used
//!
//! - `GET /search?type=track`
//! - `GET /me/player/recently-played`
//! - `GET /me/top/tracks`, `GET /me/top/artists`
//! - `GET /artists?ids=`, `GET /artists/{id}/albums`
//! - `GET /albums/{id}/tracks`, `GET /tracks/{id}`
//! - `GET /me`
//! - `POST /api/token`
//!
//! ## Errors
//!
//! HTTP failures map onto [`CatalogError`](crate::recommend::CatalogError):
//! 401 and 403 become `Unauthorized`, 429 becomes `RateLimited` carrying the
//! `Retry-After` seconds, any other non-success status becomes `Status`.
//! Nothing is retried; the pipeline decides what a failure means.

pub mod auth;
pub mod client;

pub use client::SpotifyClient;

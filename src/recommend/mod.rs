//! # Recommendation pipeline
//!
//! Turns a stored [`UserPreference`](crate::types::UserPreference) into a
//! shuffled list of tracks using nothing but keyword search and the user's
//! listening history.
//!
//! ```text
//! Recommender
//!     ├── analyzer      (personal mix only: recent plays → top genres)
//!     ├── catalog       (genre → search templates)
//!     ├── collector     (bounded searches, artist saturation cap)
//!     ├── dedup         (id / title+artist)
//!     └── sampler       (widening, shuffle, truncate)
//!          ↓
//! RecommendationSink (replace the session's stored list)
//! ```
//!
//! ## Failure handling
//!
//! Individual calls that fail are not retried. They are recorded as
//! [`QueryOutcome::Skipped`] with a [`SkipReason`] and the pipeline moves on to
//! its next query, genre or time window. Only authorization failures abort a
//! run ([`RecommendError::Unauthorized`]). A run where every source came up
//! empty ends in [`RecommendationOutcome::NoRecommendations`].
//!
//! ## Randomness
//!
//! Strategy picks and the final shuffle draw from a caller supplied
//! [`rand::Rng`], so a seeded generator gives reproducible runs.

pub mod analyzer;
pub mod capability;
pub mod catalog;
pub mod collector;
pub mod dedup;
mod error;
mod orchestrator;
mod outcome;
pub mod sampler;
mod settings;
pub mod stats;

pub use capability::{CatalogError, MusicCatalog, RecommendationSink, TokenProvider};
pub use catalog::GenreLabel;
pub use error::RecommendError;
pub use orchestrator::{Mode, RecommendationOutcome, Recommender, Selection};
pub use outcome::{Ledger, QueryOutcome, SkipReason};
pub use settings::{PERSONAL_MIX, RecommendSettings};

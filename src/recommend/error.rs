use thiserror::Error;

use crate::management::StoreError;

/// Conditions that escape the recommendation pipeline.
///
/// Everything else (rate limits, 5xx, bad bodies, empty searches) is absorbed
/// into [`super::QueryOutcome::Skipped`] records and never surfaces here.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The credential is unusable; the user has to authenticate again.
    #[error("Spotify authorization failed: {0}")]
    Unauthorized(String),

    #[error("Cannot store recommendations: {0}")]
    Persistence(#[from] StoreError),
}

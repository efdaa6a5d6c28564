use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    recommend::{GenreLabel, QueryOutcome, catalog},
    types::{GenreTableRow, PersistedRecommendation, RecommendationTableRow},
};

/// Generates a cryptographically random PKCE code verifier.
///
/// 128 alphanumeric characters, the maximum length RFC 7636 allows.
pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

/// Derives the S256 code challenge for a verifier: base64url(sha256(verifier))
/// without padding.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Spinner shown while the pipeline is talking to Spotify.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Table rows numbered from 1 in the given order.
pub fn recommendation_rows(records: &[&PersistedRecommendation]) -> Vec<RecommendationTableRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| RecommendationTableRow {
            position: i + 1,
            track: r.track_name.clone(),
            artist: r.artist_name.clone(),
            url: r.spotify_url.clone(),
        })
        .collect()
}

/// One row per canonical genre with its search templates.
pub fn genre_rows() -> Vec<GenreTableRow> {
    catalog::canonical_genres()
        .into_iter()
        .map(|genre| GenreTableRow {
            genre: genre.to_string(),
            templates: catalog::templates_for(&GenreLabel::new(genre)).join(", "),
        })
        .collect()
}

/// Count of skipped calls in a run.
pub fn skipped_count(outcomes: &[QueryOutcome]) -> usize {
    outcomes.iter().filter(|o| o.is_skipped()).count()
}

//! Collaborator capabilities the pipeline is written against.
//!
//! Production code plugs in [`crate::spotify::SpotifyClient`],
//! [`crate::management::TokenManager`] and
//! [`crate::management::RecommendationStore`]; tests plug in in-memory doubles.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    management::StoreError,
    types::{Artist, PersistedRecommendation, PlayHistory, SimplifiedAlbum, SimplifiedTrack, TimeRange, Track},
};

/// Failure of a single call against the music catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Expired, revoked or missing credential. Never skipped by the pipeline.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("service responded with HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CatalogError::Unauthorized(_))
    }
}

/// Read access to the streaming service's catalog and the user's history.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Full-text track search.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError>;

    /// The user's most recently played tracks, newest first.
    async fn recently_played(&self, limit: u32) -> Result<Vec<PlayHistory>, CatalogError>;

    async fn top_tracks(&self, limit: u32, range: TimeRange) -> Result<Vec<Track>, CatalogError>;

    async fn top_artists(&self, limit: u32, range: TimeRange) -> Result<Vec<Artist>, CatalogError>;

    /// Full artist records for at most 20 ids. Unknown ids are left out.
    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError>;

    /// Albums and singles of an artist.
    async fn artist_albums(
        &self,
        artist_id: &str,
        limit: u32,
    ) -> Result<Vec<SimplifiedAlbum>, CatalogError>;

    async fn album_tracks(
        &self,
        album_id: &str,
        limit: u32,
    ) -> Result<Vec<SimplifiedTrack>, CatalogError>;

    async fn track(&self, track_id: &str) -> Result<Track, CatalogError>;
}

/// Supplies a bearer credential for the catalog.
#[async_trait]
pub trait TokenProvider: Send {
    async fn access_token(&mut self) -> Result<String, CatalogError>;
}

/// Durable storage of the recommendations shown to a session.
#[async_trait]
pub trait RecommendationSink: Send {
    async fn delete_recommendations(&mut self, session_key: &str) -> Result<(), StoreError>;

    async fn create_recommendation(
        &mut self,
        session_key: &str,
        track_name: &str,
        artist_name: &str,
        spotify_url: &str,
    ) -> Result<PersistedRecommendation, StoreError>;
}

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::{config, recommend::RecommendationSink, types::PersistedRecommendation};

use super::json::{StoreError, read_json, write_json};

/// Recommendations of all sessions, kept in one JSON file.
pub struct RecommendationStore {
    path: PathBuf,
    records: Vec<PersistedRecommendation>,
}

impl RecommendationStore {
    pub async fn open() -> Result<Self, StoreError> {
        Self::open_at(config::data_dir().join("recommendations.json")).await
    }

    pub async fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let records = read_json(&path).await?.unwrap_or_default();
        Ok(Self { path, records })
    }

    /// Recommendations of a session, newest insertion first.
    pub fn for_session(&self, session_key: &str) -> Vec<&PersistedRecommendation> {
        let mut records: Vec<&PersistedRecommendation> = self
            .records
            .iter()
            .filter(|r| r.session_key == session_key)
            .collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().map_or(1, |id| id + 1)
    }
}

#[async_trait]
impl RecommendationSink for RecommendationStore {
    async fn delete_recommendations(&mut self, session_key: &str) -> Result<(), StoreError> {
        self.records.retain(|r| r.session_key != session_key);
        write_json(&self.path, &self.records).await
    }

    async fn create_recommendation(
        &mut self,
        session_key: &str,
        track_name: &str,
        artist_name: &str,
        spotify_url: &str,
    ) -> Result<PersistedRecommendation, StoreError> {
        let record = PersistedRecommendation {
            id: self.next_id(),
            session_key: session_key.to_string(),
            track_name: track_name.to_string(),
            artist_name: artist_name.to_string(),
            spotify_url: spotify_url.to_string(),
            recommended_at: Utc::now(),
        };
        self.records.push(record.clone());
        write_json(&self.path, &self.records).await?;
        Ok(record)
    }
}

use std::path::PathBuf;

use crate::{config, types::UserPreference};

use super::json::{StoreError, read_json, write_json};

/// Append-only log of genre preferences; the latest entry of a session wins.
pub struct PreferenceStore {
    path: PathBuf,
    preferences: Vec<UserPreference>,
}

impl PreferenceStore {
    pub async fn open() -> Result<Self, StoreError> {
        Self::open_at(config::data_dir().join("preferences.json")).await
    }

    pub async fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let preferences = read_json(&path).await?.unwrap_or_default();
        Ok(Self { path, preferences })
    }

    /// Stores `genre` for `session_key` (normalized to lowercase, trimmed).
    pub async fn record(&mut self, session_key: &str, genre: &str) -> Result<&UserPreference, StoreError> {
        self.preferences.push(UserPreference {
            session_key: session_key.to_string(),
            genre: genre.trim().to_lowercase(),
        });
        write_json(&self.path, &self.preferences).await?;
        Ok(&self.preferences[self.preferences.len() - 1])
    }

    pub fn latest(&self, session_key: &str) -> Option<&UserPreference> {
        self.preferences
            .iter()
            .rev()
            .find(|p| p.session_key == session_key)
    }
}

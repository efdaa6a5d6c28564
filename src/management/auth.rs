use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    config,
    recommend::{CatalogError, TokenProvider},
    spotify,
    types::Token,
};

use super::json::{StoreError, read_json, write_json};

/// Seconds before expiry at which the token is refreshed.
const REFRESH_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Loads the token saved by `spotmix auth`.
    pub async fn load() -> Result<Self, String> {
        match read_json::<Token>(&Self::token_path()).await {
            Ok(Some(token)) => Ok(Self { token }),
            Ok(None) => Err("no token stored".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        write_json(&Self::token_path(), &self.token).await
    }

    /// Current access token, refreshed first when it is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String, CatalogError> {
        if self.is_expired() {
            let refreshed = spotify::auth::refresh_token(&self.token.refresh_token)
                .await
                .map_err(|e| CatalogError::Unauthorized(format!("token refresh failed: {e}")))?;

            self.token = Token {
                // Spotify may omit the refresh token when it does not rotate it
                refresh_token: if refreshed.refresh_token.is_empty() {
                    self.token.refresh_token.clone()
                } else {
                    refreshed.refresh_token
                },
                ..refreshed
            };

            if let Err(e) = self.persist().await {
                log::warn!("Cannot persist refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}

#[async_trait]
impl TokenProvider for TokenManager {
    async fn access_token(&mut self) -> Result<String, CatalogError> {
        self.get_valid_token().await
    }
}

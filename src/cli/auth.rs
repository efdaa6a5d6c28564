use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error,
    management::TokenManager,
    recommend::TokenProvider,
    spotify::{self, SpotifyClient},
    types::PkceToken,
};

/// Authenticates with Spotify through the browser.
///
/// The token is stored in the data directory and refreshed automatically by
/// every other command.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
}

/// Builds a catalog client from the stored token, refreshing it if needed.
///
/// Exits with a hint to run `spotmix auth` when no usable token exists.
pub(crate) async fn connect() -> SpotifyClient {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!("Failed to load token. Please run spotmix auth\n Error: {}", e),
    };

    match token_mgr.access_token().await {
        Ok(token) => SpotifyClient::new(token),
        Err(e) => error!("{}. Please run spotmix auth", e),
    }
}

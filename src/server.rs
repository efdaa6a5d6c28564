//! Local HTTP server receiving the OAuth redirect during `spotmix auth`.

use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, config, types::PkceToken};

/// Serves `/health` and `/callback` on [`config::server_addr`] until the
/// process exits.
///
/// The shared state carries the PKCE verifier in and the exchanged token out.
pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> crate::Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::debug!("Callback server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe of the callback server.
///
/// Handy for checking that `SERVER_ADDRESS` is reachable before pointing the
/// Spotify app's redirect URI at it.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

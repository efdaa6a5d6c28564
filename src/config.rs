//! Configuration management for spotmix.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file in the local data directory. Every Spotify endpoint has a sane
//! default; only the application client id has to be provided by the user.
//!
//! Precedence:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::recommend::RecommendSettings;

const APP_DIR: &str = "spotmix";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SCOPE: &str =
    "user-library-read user-read-playback-state user-top-read user-read-recently-played";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SESSION: &str = "default";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (see .env.example)")]
    Missing(&'static str),
}

/// Loads environment variables from `<data_local_dir>/spotmix/.env`.
///
/// The directory is created when missing. A missing `.env` file is fine since
/// every value can come from the process environment as well; a file that
/// exists but cannot be parsed is reported as an error.
///
/// # Example
///
/// ```
/// use spotmix::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

/// Base directory for everything spotmix persists.
///
/// - Linux: `~/.local/share/spotmix`
/// - macOS: `~/Library/Application Support/spotmix`
/// - Windows: `%LOCALAPPDATA%/spotmix`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client id of the registered Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    match env::var("SPOTIFY_API_AUTH_CLIENT_ID") {
        Ok(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID")),
    }
}

/// OAuth redirect URI, must match the one registered with Spotify.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Space separated OAuth scopes requested during authentication.
///
/// Recommendations need `user-top-read` and `user-read-recently-played`.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Spotify authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Spotify token exchange endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Session key used when the CLI is not given `--session`.
pub fn session_key() -> String {
    var_or("SPOTMIX_SESSION", DEFAULT_SESSION)
}

/// Pipeline tuning read from the environment, falling back to
/// [`RecommendSettings::default`] for anything unset or unparsable.
///
/// A limit or saturation cap of 0 could never yield a recommendation and is
/// rejected like an unparsable value.
pub fn recommend_settings() -> RecommendSettings {
    let defaults = RecommendSettings::default();
    RecommendSettings {
        limit: positive_or("RECOMMENDATION_LIMIT", defaults.limit),
        saturation_cap: positive_or("ARTIST_SATURATION_CAP", defaults.saturation_cap),
        recently_played_limit: parse_or("RECENTLY_PLAYED_LIMIT", defaults.recently_played_limit),
        variants_per_template: parse_or("VARIANTS_PER_TEMPLATE", defaults.variants_per_template),
        ..defaults
    }
}

fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn parse_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    parse_valid(name, default, |_| true)
}

fn positive_or(name: &str, default: usize) -> usize {
    parse_valid(name, default, |value| *value > 0)
}

fn parse_valid<T: FromStr + Copy>(name: &str, default: T, valid: impl Fn(&T) -> bool) -> T {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            log::warn!("Ignoring invalid value {:?} for {}", raw, name);
            default
        }
    }
}

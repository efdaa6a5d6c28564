use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;

use crate::{
    config,
    recommend::{CatalogError, MusicCatalog},
    types::{
        Artist, Paging, PlayHistory, SearchResponse, SeveralArtistsResponse, SimplifiedAlbum,
        SimplifiedTrack, TimeRange, Track, UserProfile,
    },
};

/// Spotify's cap on ids per `/artists` request.
const MAX_ARTIST_IDS: usize = 20;

/// Read-only Spotify Web API client bound to one access token.
///
/// Each call is a single request. Failures are mapped onto [`CatalogError`]
/// and never retried here.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, config::spotify_apiurl())
    }

    pub fn with_base_url(token: String, api_url: String) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Profile of the authenticated user (`GET /me`).
    pub async fn current_user(&self) -> Result<UserProfile, CatalogError> {
        self.get_json("/me", &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let body = response.text().await.unwrap_or_default();
            Err(CatalogError::Unauthorized(format!("HTTP {}: {}", status.as_u16(), body)))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            Err(CatalogError::RateLimited { retry_after })
        }
        _ => Err(CatalogError::Status(status.as_u16())),
    }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        let res: SearchResponse = self
            .get_json(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(res.tracks.items)
    }

    async fn recently_played(&self, limit: u32) -> Result<Vec<PlayHistory>, CatalogError> {
        let res: Paging<PlayHistory> = self
            .get_json("/me/player/recently-played", &[("limit", limit.to_string())])
            .await?;
        Ok(res.items)
    }

    async fn top_tracks(&self, limit: u32, range: TimeRange) -> Result<Vec<Track>, CatalogError> {
        let res: Paging<Track> = self
            .get_json(
                "/me/top/tracks",
                &[
                    ("limit", limit.to_string()),
                    ("time_range", range.to_string()),
                ],
            )
            .await?;
        Ok(res.items)
    }

    async fn top_artists(&self, limit: u32, range: TimeRange) -> Result<Vec<Artist>, CatalogError> {
        let res: Paging<Artist> = self
            .get_json(
                "/me/top/artists",
                &[
                    ("limit", limit.to_string()),
                    ("time_range", range.to_string()),
                ],
            )
            .await?;
        Ok(res.items)
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = &ids[..ids.len().min(MAX_ARTIST_IDS)];
        let res: SeveralArtistsResponse = self
            .get_json("/artists", &[("ids", ids.join(","))])
            .await?;
        Ok(res.artists.into_iter().flatten().collect())
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        limit: u32,
    ) -> Result<Vec<SimplifiedAlbum>, CatalogError> {
        let res: Paging<SimplifiedAlbum> = self
            .get_json(
                &format!("/artists/{}/albums", artist_id),
                &[
                    ("include_groups", "album,single".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(res.items)
    }

    async fn album_tracks(
        &self,
        album_id: &str,
        limit: u32,
    ) -> Result<Vec<SimplifiedTrack>, CatalogError> {
        let res: Paging<SimplifiedTrack> = self
            .get_json(
                &format!("/albums/{}/tracks", album_id),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(res.items)
    }

    async fn track(&self, track_id: &str) -> Result<Track, CatalogError> {
        self.get_json(&format!("/tracks/{}", track_id), &[]).await
    }
}

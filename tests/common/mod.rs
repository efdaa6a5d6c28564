#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use spotmix::{
    management::StoreError,
    recommend::{CatalogError, MusicCatalog, RecommendationSink},
    types::{
        Artist, ExternalUrls, PersistedRecommendation, PlayHistory, SimplifiedAlbum,
        SimplifiedTrack, TimeRange, Track, TrackArtist,
    },
};

type SearchFn = Box<dyn Fn(&str, u32) -> Result<Vec<Track>, CatalogError> + Send + Sync>;

// In-memory catalog. Anything not configured answers with an empty list.
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<String, Result<Vec<Track>, CatalogError>>,
    any_search: Option<SearchFn>,
    recently_played: Option<Result<Vec<PlayHistory>, CatalogError>>,
    top_tracks: HashMap<TimeRange, Result<Vec<Track>, CatalogError>>,
    top_artists: HashMap<TimeRange, Result<Vec<Artist>, CatalogError>>,
    artists: HashMap<String, Artist>,
    artists_error: Option<CatalogError>,
    albums: HashMap<String, Vec<SimplifiedAlbum>>,
    album_tracks: HashMap<String, Vec<SimplifiedTrack>>,
    tracks: HashMap<String, Track>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, tracks: Vec<Track>) -> Self {
        self.searches.insert(query.to_string(), Ok(tracks));
        self
    }

    pub fn with_search_error(mut self, query: &str, err: CatalogError) -> Self {
        self.searches.insert(query.to_string(), Err(err));
        self
    }

    /// Answers every search without an explicit entry.
    pub fn with_any_search(
        mut self,
        f: impl Fn(&str, u32) -> Result<Vec<Track>, CatalogError> + Send + Sync + 'static,
    ) -> Self {
        self.any_search = Some(Box::new(f));
        self
    }

    pub fn with_recently_played(mut self, items: Vec<PlayHistory>) -> Self {
        self.recently_played = Some(Ok(items));
        self
    }

    pub fn with_recently_played_error(mut self, err: CatalogError) -> Self {
        self.recently_played = Some(Err(err));
        self
    }

    pub fn with_top_tracks(mut self, range: TimeRange, tracks: Vec<Track>) -> Self {
        self.top_tracks.insert(range, Ok(tracks));
        self
    }

    pub fn with_top_tracks_error(mut self, range: TimeRange, err: CatalogError) -> Self {
        self.top_tracks.insert(range, Err(err));
        self
    }

    pub fn with_top_artists(mut self, range: TimeRange, artists: Vec<Artist>) -> Self {
        self.top_artists.insert(range, Ok(artists));
        self
    }

    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.artists.insert(artist.id.clone(), artist);
        self
    }

    pub fn with_artists_error(mut self, err: CatalogError) -> Self {
        self.artists_error = Some(err);
        self
    }

    pub fn with_albums(mut self, artist_id: &str, albums: Vec<SimplifiedAlbum>) -> Self {
        self.albums.insert(artist_id.to_string(), albums);
        self
    }

    pub fn with_album_tracks(mut self, album_id: &str, tracks: Vec<SimplifiedTrack>) -> Self {
        self.album_tracks.insert(album_id.to_string(), tracks);
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.insert(track.id.clone(), track);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Queries passed to `search_tracks`, in call order.
    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("search:").map(str::to_string))
            .collect()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn truncated<T: Clone>(items: &[T], limit: u32) -> Vec<T> {
    items.iter().take(limit as usize).cloned().collect()
}

#[async_trait]
impl MusicCatalog for FakeCatalog {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        self.log(format!("search:{query}"));
        match self.searches.get(query) {
            Some(Ok(tracks)) => Ok(truncated(tracks, limit)),
            Some(Err(e)) => Err(e.clone()),
            None => match &self.any_search {
                Some(f) => f(query, limit).map(|tracks| truncated(&tracks, limit)),
                None => Ok(vec![]),
            },
        }
    }

    async fn recently_played(&self, limit: u32) -> Result<Vec<PlayHistory>, CatalogError> {
        self.log(format!("recently_played:{limit}"));
        match &self.recently_played {
            Some(Ok(items)) => Ok(truncated(items, limit)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(vec![]),
        }
    }

    async fn top_tracks(&self, limit: u32, range: TimeRange) -> Result<Vec<Track>, CatalogError> {
        self.log(format!("top_tracks:{range}"));
        match self.top_tracks.get(&range) {
            Some(Ok(tracks)) => Ok(truncated(tracks, limit)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(vec![]),
        }
    }

    async fn top_artists(&self, limit: u32, range: TimeRange) -> Result<Vec<Artist>, CatalogError> {
        self.log(format!("top_artists:{range}"));
        match self.top_artists.get(&range) {
            Some(Ok(artists)) => Ok(truncated(artists, limit)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(vec![]),
        }
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError> {
        self.log(format!("artists:{}", ids.len()));
        if let Some(e) = &self.artists_error {
            return Err(e.clone());
        }
        Ok(ids.iter().filter_map(|id| self.artists.get(id).cloned()).collect())
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        limit: u32,
    ) -> Result<Vec<SimplifiedAlbum>, CatalogError> {
        self.log(format!("artist_albums:{artist_id}"));
        Ok(self
            .albums
            .get(artist_id)
            .map(|a| truncated(a, limit))
            .unwrap_or_default())
    }

    async fn album_tracks(
        &self,
        album_id: &str,
        limit: u32,
    ) -> Result<Vec<SimplifiedTrack>, CatalogError> {
        self.log(format!("album_tracks:{album_id}"));
        Ok(self
            .album_tracks
            .get(album_id)
            .map(|t| truncated(t, limit))
            .unwrap_or_default())
    }

    async fn track(&self, track_id: &str) -> Result<Track, CatalogError> {
        self.log(format!("track:{track_id}"));
        self.tracks
            .get(track_id)
            .cloned()
            .ok_or(CatalogError::Status(404))
    }
}

// Recommendation sink keeping everything in memory.
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<PersistedRecommendation>,
    pub calls: Vec<String>,
    next_id: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink already holding one recommendation for `session_key`.
    pub fn with_existing(session_key: &str) -> Self {
        let mut sink = Self::new();
        sink.next_id = 1;
        sink.records.push(PersistedRecommendation {
            id: 1,
            session_key: session_key.to_string(),
            track_name: "Old Song".to_string(),
            artist_name: "Old Artist".to_string(),
            spotify_url: "https://open.spotify.com/track/old".to_string(),
            recommended_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        });
        sink
    }

    pub fn for_session(&self, session_key: &str) -> Vec<&PersistedRecommendation> {
        self.records
            .iter()
            .filter(|r| r.session_key == session_key)
            .collect()
    }
}

#[async_trait]
impl RecommendationSink for MemorySink {
    async fn delete_recommendations(&mut self, session_key: &str) -> Result<(), StoreError> {
        self.calls.push(format!("delete:{session_key}"));
        self.records.retain(|r| r.session_key != session_key);
        Ok(())
    }

    async fn create_recommendation(
        &mut self,
        session_key: &str,
        track_name: &str,
        artist_name: &str,
        spotify_url: &str,
    ) -> Result<PersistedRecommendation, StoreError> {
        self.calls.push(format!("create:{track_name}"));
        self.next_id += 1;
        let record = PersistedRecommendation {
            id: self.next_id,
            session_key: session_key.to_string(),
            track_name: track_name.to_string(),
            artist_name: artist_name.to_string(),
            spotify_url: spotify_url.to_string(),
            recommended_at: Utc::now(),
        };
        self.records.push(record.clone());
        Ok(record)
    }
}

pub fn track(id: &str, name: &str, artist: &str) -> Track {
    track_by(id, name, &[artist])
}

pub fn track_by(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                id: Some(format!("{}-id", a.to_lowercase().replace(' ', "-"))),
                name: a.to_string(),
            })
            .collect(),
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{id}")),
        },
    }
}

pub fn artist(id: &str, name: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

/// Play history item whose single artist has the given id.
pub fn play(track_id: &str, artist_id: &str) -> PlayHistory {
    PlayHistory {
        track: Track {
            id: track_id.to_string(),
            name: format!("Song {track_id}"),
            artists: vec![TrackArtist {
                id: Some(artist_id.to_string()),
                name: format!("Artist {artist_id}"),
            }],
            external_urls: ExternalUrls::default(),
        },
        played_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn rate_limited() -> CatalogError {
    CatalogError::RateLimited {
        retry_after: Some(30),
    }
}

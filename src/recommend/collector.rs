//! Candidate collection.
//!
//! Every call made here is bounded by [`RecommendSettings`], and every failure
//! short of an authorization error is recorded in the [`Ledger`] and skipped.

use std::collections::{HashMap, HashSet};

use rand::{Rng, seq::IndexedRandom};

use crate::types::{TimeRange, Track};

use super::{
    capability::MusicCatalog,
    catalog::{self, GenreLabel},
    error::RecommendError,
    outcome::Ledger,
    settings::RecommendSettings,
};

const TOP_ARTISTS_LIMIT: u32 = 10;
const ALBUM_LOOKUP_LIMIT: u32 = 5;
const RECENT_HISTORY_LIMIT: u32 = 30;

/// Per-run tally of accepted tracks by primary artist.
#[derive(Debug)]
pub struct ArtistSaturation {
    cap: usize,
    counts: HashMap<String, usize>,
}

impl ArtistSaturation {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            counts: HashMap::new(),
        }
    }

    /// True when fewer than `cap` accepted tracks have a primary artist that
    /// is credited on `track`.
    pub fn admits(&self, track: &Track) -> bool {
        let names: HashSet<&str> = track.artists.iter().map(|a| a.name.as_str()).collect();
        let taken: usize = names
            .iter()
            .map(|name| self.counts.get(*name).copied().unwrap_or(0))
            .sum();
        taken < self.cap
    }

    pub fn record(&mut self, track: &Track) {
        *self
            .counts
            .entry(track.primary_artist_name().to_string())
            .or_insert(0) += 1;
    }

    pub fn count(&self, artist_name: &str) -> usize {
        self.counts.get(artist_name).copied().unwrap_or(0)
    }
}

/// Tracks gathered by one collection pass, in acceptance order.
#[derive(Debug)]
pub struct Collection {
    pub tracks: Vec<Track>,
    /// Top-track windows already consulted, so widening can skip them.
    pub consulted_windows: Vec<TimeRange>,
}

struct Accumulator {
    tracks: Vec<Track>,
    saturation: ArtistSaturation,
}

impl Accumulator {
    fn new(cap: usize) -> Self {
        Self {
            tracks: Vec::new(),
            saturation: ArtistSaturation::new(cap),
        }
    }

    fn offer(&mut self, track: Track) -> bool {
        if !self.saturation.admits(&track) {
            return false;
        }
        self.saturation.record(&track);
        self.tracks.push(track);
        true
    }

    /// Like `offer`, but also rejects ids that were already collected.
    fn offer_new(&mut self, track: Track) -> bool {
        if self.tracks.iter().any(|t| t.id == track.id) {
            return false;
        }
        self.offer(track)
    }

    fn finish(self, consulted_windows: Vec<TimeRange>) -> Collection {
        Collection {
            tracks: self.tracks,
            consulted_windows,
        }
    }
}

pub struct Collector<'a> {
    catalog: &'a dyn MusicCatalog,
    settings: &'a RecommendSettings,
}

impl<'a> Collector<'a> {
    pub fn new(catalog: &'a dyn MusicCatalog, settings: &'a RecommendSettings) -> Self {
        Self { catalog, settings }
    }

    /// Searches the catalog templates of a single genre.
    pub async fn collect_genre<R: Rng + ?Sized>(
        &self,
        genre: &GenreLabel,
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> Result<Collection, RecommendError> {
        let mut acc = Accumulator::new(self.settings.saturation_cap);
        let templates = catalog::templates_for(genre);

        for template in templates.iter().take(self.settings.max_templates) {
            self.search_into(template, self.settings.template_result_limit, &mut acc, ledger)
                .await?;

            if self.settings.variants_per_template == 0 {
                continue;
            }

            let variants: Vec<String> = catalog::template_variants(template)
                .choose_multiple(rng, self.settings.variants_per_template)
                .cloned()
                .collect();
            for variant in &variants {
                self.search_into(variant, self.settings.variant_result_limit, &mut acc, ledger)
                    .await?;
            }
        }

        log::info!("Collected {} tracks for genre {}", acc.tracks.len(), genre);
        Ok(acc.finish(Vec::new()))
    }

    /// Collects from the user's own genres, top artists and recent artists.
    pub async fn collect_personal_mix<R: Rng + ?Sized>(
        &self,
        genres: &[GenreLabel],
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> Result<Collection, RecommendError> {
        let mut acc = Accumulator::new(self.settings.saturation_cap);

        for genre in genres {
            let strategies = catalog::strategy_variants(genre);
            let Some(strategy) = strategies.choose(rng) else {
                continue;
            };
            self.search_into(strategy, self.settings.strategy_result_limit, &mut acc, ledger)
                .await?;
        }

        self.collect_from_top_artists(&mut acc, ledger, rng).await?;
        self.collect_from_recent_artists(&mut acc, ledger, rng).await?;

        log::info!("Collected {} tracks for personal mix", acc.tracks.len());
        Ok(acc.finish(Vec::new()))
    }

    /// Personal-mix seed used when no genres could be derived: searches the
    /// artists behind the user's top tracks.
    pub async fn collect_from_top_tracks(
        &self,
        ledger: &mut Ledger,
    ) -> Result<Collection, RecommendError> {
        let mut acc = Accumulator::new(self.settings.saturation_cap);
        let mut consulted = Vec::new();
        let mut top = Vec::new();

        for range in [TimeRange::ShortTerm, TimeRange::MediumTerm] {
            consulted.push(range);
            let label = format!("top tracks ({range})");
            let result = self
                .catalog
                .top_tracks(self.settings.top_tracks_limit, range)
                .await;
            let Some(tracks) = ledger.check(&label, result)? else {
                continue;
            };
            if tracks.is_empty() {
                ledger.skip_empty(&label);
                continue;
            }
            ledger.record(&label, tracks.len(), 0);
            top = tracks;
            break;
        }

        let mut seen = HashSet::new();
        let names: Vec<String> = top
            .iter()
            .flat_map(|t| t.artists.iter())
            .map(|a| a.name.clone())
            .filter(|name| seen.insert(name.clone()))
            .take(self.settings.top_artist_seeds)
            .collect();

        for name in &names {
            let query = format!("artist:\"{name}\"");
            self.search_into(&query, self.settings.seed_search_limit, &mut acc, ledger)
                .await?;
        }

        log::info!("Collected {} tracks from top tracks", acc.tracks.len());
        Ok(acc.finish(consulted))
    }

    async fn collect_from_top_artists<R: Rng + ?Sized>(
        &self,
        acc: &mut Accumulator,
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> Result<(), RecommendError> {
        let label = format!("top artists ({})", TimeRange::ShortTerm);
        let Some(artists) = ledger.check(
            &label,
            self.catalog
                .top_artists(TOP_ARTISTS_LIMIT, TimeRange::ShortTerm)
                .await,
        )?
        else {
            return Ok(());
        };
        if artists.is_empty() {
            ledger.skip_empty(&label);
            return Ok(());
        }

        for artist in artists.iter().take(self.settings.top_artist_seeds) {
            let label = format!("albums of {}", artist.name);
            let result = self.catalog.artist_albums(&artist.id, ALBUM_LOOKUP_LIMIT).await;
            let Some(albums) = ledger.check(&label, result)? else {
                continue;
            };
            let Some(album) = albums.choose(rng) else {
                ledger.skip_empty(&label);
                continue;
            };

            let label = format!("tracks of album {}", album.name);
            let Some(album_tracks) =
                ledger.check(&label, self.catalog.album_tracks(&album.id, ALBUM_LOOKUP_LIMIT).await)?
            else {
                continue;
            };
            let Some(picked) = album_tracks.choose(rng) else {
                ledger.skip_empty(&label);
                continue;
            };

            let label = format!("track {}", picked.id);
            let Some(track) = ledger.check(&label, self.catalog.track(&picked.id).await)? else {
                continue;
            };
            let accepted = acc.offer_new(track);
            ledger.record(&label, 1, usize::from(accepted));
        }

        Ok(())
    }

    async fn collect_from_recent_artists<R: Rng + ?Sized>(
        &self,
        acc: &mut Accumulator,
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> Result<(), RecommendError> {
        let label = format!("recently played ({RECENT_HISTORY_LIMIT})");
        let result = self.catalog.recently_played(RECENT_HISTORY_LIMIT).await;
        let Some(history) = ledger.check(&label, result)? else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        let artists: Vec<String> = history
            .iter()
            .flat_map(|item| item.track.artists.iter())
            .filter(|a| seen.insert((a.id.clone(), a.name.clone())))
            .map(|a| a.name.clone())
            .collect();
        if artists.is_empty() {
            ledger.skip_empty(&label);
            return Ok(());
        }

        let sampled: Vec<String> = artists
            .choose_multiple(rng, self.settings.recent_artist_seeds)
            .cloned()
            .collect();

        for name in &sampled {
            let query = format!("artist:\"{name}\" NOT popular");
            let result = self
                .catalog
                .search_tracks(&query, self.settings.seed_search_limit)
                .await;
            let Some(results) = ledger.check(&query, result)? else {
                continue;
            };
            let Some(track) = results.choose(rng) else {
                ledger.skip_empty(&query);
                continue;
            };
            let accepted = acc.offer_new(track.clone());
            ledger.record(&query, results.len(), usize::from(accepted));
        }

        Ok(())
    }

    async fn search_into(
        &self,
        query: &str,
        limit: u32,
        acc: &mut Accumulator,
        ledger: &mut Ledger,
    ) -> Result<(), RecommendError> {
        log::debug!("Searching tracks: {:?}", query);
        let Some(results) = ledger.check(query, self.catalog.search_tracks(query, limit).await)?
        else {
            return Ok(());
        };

        let fetched = results.len();
        let mut accepted = 0;
        for track in results {
            if acc.offer(track) {
                accepted += 1;
            }
        }
        ledger.record(query, fetched, accepted);
        Ok(())
    }
}

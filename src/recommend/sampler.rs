//! Widening and final selection.

use rand::{Rng, seq::SliceRandom};

use crate::types::{TimeRange, Track};

use super::{
    capability::MusicCatalog,
    catalog::{self, GenreLabel},
    dedup::Deduplicator,
    error::RecommendError,
    outcome::Ledger,
    settings::RecommendSettings,
};

const WIDENING_TOP_TRACKS: u32 = 10;

/// Sources the sampler may fall back on when the pool is short.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideningPlan {
    /// Genres whose broader templates are searched, in order.
    pub genres: Vec<GenreLabel>,
    /// Top-track windows to consult after the broader searches.
    pub time_windows: Vec<TimeRange>,
}

impl WideningPlan {
    pub fn for_genre(genre: &GenreLabel) -> Self {
        Self {
            genres: vec![genre.clone()],
            time_windows: Vec::new(),
        }
    }

    /// Personal mix: the user's genres, then the medium and long term windows
    /// that collection did not already look at.
    pub fn for_personal_mix(genres: &[GenreLabel], consulted: &[TimeRange]) -> Self {
        Self {
            genres: genres.to_vec(),
            time_windows: [TimeRange::MediumTerm, TimeRange::LongTerm]
                .into_iter()
                .filter(|range| !consulted.contains(range))
                .collect(),
        }
    }
}

pub struct DiversitySampler<'a> {
    catalog: &'a dyn MusicCatalog,
    settings: &'a RecommendSettings,
}

impl<'a> DiversitySampler<'a> {
    pub fn new(catalog: &'a dyn MusicCatalog, settings: &'a RecommendSettings) -> Self {
        Self { catalog, settings }
    }

    /// Widens a deduplicated pool if needed, then shuffles and truncates it.
    pub async fn sample<R: Rng + ?Sized>(
        &self,
        mut pool: Vec<Track>,
        plan: &WideningPlan,
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> Result<Vec<Track>, RecommendError> {
        if pool.len() < self.settings.limit {
            self.widen(&mut pool, plan, ledger).await?;
        }
        Ok(finalize(pool, self.settings.limit, rng))
    }

    /// Adds tracks from broader sources until the pool reaches the limit or
    /// the plan is exhausted.
    ///
    /// Only the deduplication key is checked here; the artist saturation cap
    /// is not applied while widening.
    pub async fn widen(
        &self,
        pool: &mut Vec<Track>,
        plan: &WideningPlan,
        ledger: &mut Ledger,
    ) -> Result<(), RecommendError> {
        let limit = self.settings.limit;
        let mut dedup = Deduplicator::seeded(pool);
        log::info!("Widening search, {} of {} tracks found", pool.len(), limit);

        for genre in &plan.genres {
            for query in catalog::broader_templates(genre) {
                if pool.len() >= limit {
                    return Ok(());
                }

                let result = self
                    .catalog
                    .search_tracks(&query, self.settings.widening_result_limit)
                    .await;
                let Some(tracks) = ledger.check(&query, result)? else {
                    continue;
                };
                let fetched = tracks.len();
                let added = admit_until(pool, tracks, &mut dedup, limit);
                ledger.record(&query, fetched, added);
            }
        }

        for range in &plan.time_windows {
            if pool.len() >= limit {
                return Ok(());
            }

            let label = format!("top tracks ({range})");
            let result = self.catalog.top_tracks(WIDENING_TOP_TRACKS, *range).await;
            let Some(tracks) = ledger.check(&label, result)? else {
                continue;
            };
            let fetched = tracks.len();
            let added = admit_until(pool, tracks, &mut dedup, limit);
            ledger.record(&label, fetched, added);
        }

        Ok(())
    }
}

/// Uniformly shuffles the pool and keeps at most `limit` tracks.
pub fn finalize<R: Rng + ?Sized>(mut pool: Vec<Track>, limit: usize, rng: &mut R) -> Vec<Track> {
    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}

fn admit_until(
    pool: &mut Vec<Track>,
    tracks: Vec<Track>,
    dedup: &mut Deduplicator,
    limit: usize,
) -> usize {
    let mut added = 0;
    for track in tracks {
        if pool.len() >= limit {
            break;
        }
        if dedup.admit(&track) {
            pool.push(track);
            added += 1;
        }
    }
    added
}

use std::fmt;

use rand::Rng;

use crate::types::{PersistedRecommendation, Track, UserPreference};

use super::{
    analyzer,
    capability::{MusicCatalog, RecommendationSink},
    catalog::GenreLabel,
    collector::Collector,
    dedup::deduplicate,
    error::RecommendError,
    outcome::{Ledger, QueryOutcome},
    sampler::{DiversitySampler, WideningPlan},
    settings::RecommendSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Searches built from an explicitly chosen genre.
    GenreDirected,
    /// Genres derived from the user's own listening history.
    PersonalMix,
}

impl Mode {
    pub fn of(preference: &UserPreference) -> Self {
        if GenreLabel::new(&preference.genre).is_personal_mix() {
            Mode::PersonalMix
        } else {
            Mode::GenreDirected
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::GenreDirected => f.write_str("genre"),
            Mode::PersonalMix => f.write_str("personal mix"),
        }
    }
}

/// Tracks picked by a pipeline run, before anything is persisted.
#[derive(Debug)]
pub struct Selection {
    pub mode: Mode,
    /// The preference genre, or the genres derived from listening history.
    pub genres: Vec<GenreLabel>,
    pub tracks: Vec<Track>,
    pub outcomes: Vec<QueryOutcome>,
}

/// Terminal state of [`Recommender::generate`].
#[derive(Debug)]
pub enum RecommendationOutcome {
    /// Stored recommendations, in the order the sampler produced them.
    Generated {
        mode: Mode,
        recommendations: Vec<PersistedRecommendation>,
        outcomes: Vec<QueryOutcome>,
    },
    /// Every source came up empty. Not an error: the user should try
    /// another genre. Stored recommendations are left untouched.
    NoRecommendations {
        mode: Mode,
        outcomes: Vec<QueryOutcome>,
    },
}

impl RecommendationOutcome {
    pub fn mode(&self) -> Mode {
        match self {
            RecommendationOutcome::Generated { mode, .. }
            | RecommendationOutcome::NoRecommendations { mode, .. } => *mode,
        }
    }

    pub fn outcomes(&self) -> &[QueryOutcome] {
        match self {
            RecommendationOutcome::Generated { outcomes, .. }
            | RecommendationOutcome::NoRecommendations { outcomes, .. } => outcomes,
        }
    }
}

/// Entry point of the recommendation pipeline.
///
/// Holds the catalog for a single run; a new `Recommender` is built per
/// request with the credential of that request.
pub struct Recommender<'a> {
    catalog: &'a dyn MusicCatalog,
    settings: RecommendSettings,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a dyn MusicCatalog, settings: RecommendSettings) -> Self {
        Self { catalog, settings }
    }

    /// Runs collection, deduplication and sampling for a preference.
    pub async fn select<R: Rng + ?Sized>(
        &self,
        preference: &UserPreference,
        rng: &mut R,
    ) -> Result<Selection, RecommendError> {
        let mut ledger = Ledger::new();
        let collector = Collector::new(self.catalog, &self.settings);
        let mode = Mode::of(preference);

        let (genres, collection, plan) = match mode {
            Mode::GenreDirected => {
                let genre = GenreLabel::new(&preference.genre);
                log::info!("Building recommendations for genre {}", genre);
                let collection = collector.collect_genre(&genre, &mut ledger, rng).await?;
                let plan = WideningPlan::for_genre(&genre);
                (vec![genre], collection, plan)
            }
            Mode::PersonalMix => {
                log::info!("Building personal mix from listening history");
                let genres = analyzer::top_genres(
                    self.catalog,
                    self.settings.recently_played_limit,
                    &mut ledger,
                )
                .await?;

                let collection = if genres.is_empty() {
                    log::info!("No genres derived, falling back to top tracks");
                    collector.collect_from_top_tracks(&mut ledger).await?
                } else {
                    collector
                        .collect_personal_mix(&genres, &mut ledger, rng)
                        .await?
                };
                let plan = WideningPlan::for_personal_mix(&genres, &collection.consulted_windows);
                (genres, collection, plan)
            }
        };

        let pool = deduplicate(collection.tracks);
        let sampler = DiversitySampler::new(self.catalog, &self.settings);
        let tracks = sampler.sample(pool, &plan, &mut ledger, rng).await?;

        log::info!("Selected {} tracks ({})", tracks.len(), mode);
        Ok(Selection {
            mode,
            genres,
            tracks,
            outcomes: ledger.into_outcomes(),
        })
    }

    /// Selects tracks and replaces the session's stored recommendations.
    pub async fn generate<R, S>(
        &self,
        preference: &UserPreference,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<RecommendationOutcome, RecommendError>
    where
        R: Rng + ?Sized,
        S: RecommendationSink + ?Sized,
    {
        let selection = self.select(preference, rng).await?;

        if selection.tracks.is_empty() {
            return Ok(RecommendationOutcome::NoRecommendations {
                mode: selection.mode,
                outcomes: selection.outcomes,
            });
        }

        let session = preference.session_key.as_str();
        sink.delete_recommendations(session).await?;

        let mut recommendations = Vec::with_capacity(selection.tracks.len());
        for track in &selection.tracks {
            let stored = sink
                .create_recommendation(session, &track.name, track.primary_artist_name(), track.url())
                .await?;
            recommendations.push(stored);
        }

        Ok(RecommendationOutcome::Generated {
            mode: selection.mode,
            recommendations,
            outcomes: selection.outcomes,
        })
    }
}

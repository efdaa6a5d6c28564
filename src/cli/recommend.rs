use rand::{SeedableRng, rngs::StdRng};
use tabled::Table;

use crate::{
    config, error, info,
    management::{PreferenceStore, RecommendationStore},
    recommend::{Mode, RecommendError, RecommendationOutcome, Recommender},
    success, utils, warning,
};

use super::connect;

/// Generates a fresh set of recommendations for the session's preference and
/// replaces the stored ones.
///
/// `limit` overrides `RECOMMENDATION_LIMIT` for this run.
pub async fn recommend(session: &str, limit: Option<usize>) {
    let preference = match PreferenceStore::open().await {
        Ok(store) => match store.latest(session) {
            Some(pref) => pref.clone(),
            None => {
                warning!(
                    "No preference stored for session '{}'. Run spotmix preference <GENRE> first.",
                    session
                );
                return;
            }
        },
        Err(e) => error!("Cannot load preferences. Err: {}", e),
    };

    let mut settings = config::recommend_settings();
    if let Some(limit) = limit {
        settings.limit = limit;
    }

    let mut store = match RecommendationStore::open().await {
        Ok(s) => s,
        Err(e) => error!("Cannot load recommendations. Err: {}", e),
    };

    let client = connect().await;
    let recommender = Recommender::new(&client, settings);
    let mut rng = StdRng::from_os_rng();

    let pb = utils::spinner(&format!("Building recommendations for '{}'...", preference.genre));
    let result = recommender.generate(&preference, &mut store, &mut rng).await;
    pb.finish_and_clear();

    match result {
        Ok(RecommendationOutcome::Generated {
            mode,
            recommendations,
            outcomes,
        }) => {
            let records: Vec<_> = recommendations.iter().collect();
            println!("{}", Table::new(utils::recommendation_rows(&records)));
            success!("Saved {} recommendations ({})", recommendations.len(), mode);

            let skipped = utils::skipped_count(&outcomes);
            if skipped > 0 {
                info!("{} of {} searches were skipped. Set RUST_LOG=warn for details.", skipped, outcomes.len());
            }
        }
        Ok(RecommendationOutcome::NoRecommendations { mode, .. }) => match mode {
            Mode::GenreDirected => warning!(
                "No tracks found for '{}'. Try another genre, see spotmix genres.",
                preference.genre
            ),
            Mode::PersonalMix => warning!(
                "Not enough listening history for a personal mix yet. Listen to some music or pick a genre."
            ),
        },
        Err(RecommendError::Unauthorized(e)) => {
            error!("Spotify rejected the token ({}). Please run spotmix auth", e)
        }
        Err(e) => error!("Cannot build recommendations. Err: {}", e),
    }
}

/// Shows the stored recommendations of a session, most recent first.
pub async fn list_recommendations(session: &str) {
    let store = match RecommendationStore::open().await {
        Ok(s) => s,
        Err(e) => error!("Cannot load recommendations. Err: {}", e),
    };

    let records = store.for_session(session);
    if records.is_empty() {
        warning!("No recommendations for session '{}'. Run spotmix recommend.", session);
        return;
    }

    println!("{}", Table::new(utils::recommendation_rows(&records)));
}

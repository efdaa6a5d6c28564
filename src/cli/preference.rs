use crate::{
    error, info,
    management::PreferenceStore,
    recommend::{GenreLabel, catalog},
    success, warning,
};

/// Stores the genre recommendations are built for.
pub async fn set_preference(session: &str, genre: &str) {
    let label = GenreLabel::new(genre);
    if label.is_empty() {
        error!("Genre must not be empty.");
    }

    let mut store = match PreferenceStore::open().await {
        Ok(s) => s,
        Err(e) => error!("Cannot load preferences. Err: {}", e),
    };

    if let Err(e) = store.record(session, label.as_str()).await {
        error!("Cannot save preference. Err: {}", e);
    }

    if !label.is_personal_mix() && !catalog::is_canonical(&label) {
        warning!(
            "'{}' is not a known genre, it will be searched verbatim. See spotmix genres.",
            label
        );
    }
    success!("Preference for session '{}' set to {}", session, label);
}

pub async fn show_preference(session: &str) {
    let store = match PreferenceStore::open().await {
        Ok(s) => s,
        Err(e) => error!("Cannot load preferences. Err: {}", e),
    };

    match store.latest(session) {
        Some(pref) => info!("Preference for session '{}': {}", session, pref.genre),
        None => warning!(
            "No preference stored for session '{}'. Run spotmix preference <GENRE>.",
            session
        ),
    }
}

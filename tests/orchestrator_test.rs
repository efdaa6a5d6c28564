mod common;

use std::collections::HashSet;

use common::{FakeCatalog, MemorySink, artist, play, rate_limited, track};
use rand::{SeedableRng, rngs::StdRng};
use spotmix::{
    recommend::{
        CatalogError, Mode, PERSONAL_MIX, RecommendError, RecommendSettings,
        RecommendationOutcome, Recommender, SkipReason,
    },
    types::{TimeRange, UserPreference},
};

fn preference(genre: &str) -> UserPreference {
    UserPreference {
        session_key: "default".to_string(),
        genre: genre.to_string(),
    }
}

fn rock_catalog() -> FakeCatalog {
    FakeCatalog::new()
        .with_search(
            "rock",
            vec![
                track("1", "Paranoid Android", "Radiohead"),
                track("2", "Everlong", "Foo Fighters"),
                track("3", "Seven Nation Army", "The White Stripes"),
            ],
        )
        .with_search(
            "indie rock",
            vec![
                track("4", "Do I Wanna Know?", "Arctic Monkeys"),
                track("5", "Last Nite", "The Strokes"),
            ],
        )
        .with_search("alternative rock", vec![track("6", "Creep", "Radiohead")])
        .with_search("classic rock", vec![track("7", "Kashmir", "Led Zeppelin")])
        .with_search("hard rock", vec![track("8", "Back in Black", "AC/DC")])
}

#[test]
fn test_mode_of_preference() {
    assert_eq!(Mode::of(&preference("rock")), Mode::GenreDirected);
    assert_eq!(Mode::of(&preference(PERSONAL_MIX)), Mode::PersonalMix);
    assert_eq!(Mode::of(&preference(" Personal_Mix ")), Mode::PersonalMix);
}

#[tokio::test]
async fn test_genre_directed_run_persists_all_unique_tracks() {
    let catalog = rock_catalog();
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut sink = MemorySink::with_existing("default");
    let mut rng = StdRng::seed_from_u64(2024);

    let outcome = recommender
        .generate(&preference("rock"), &mut sink, &mut rng)
        .await
        .unwrap();

    let RecommendationOutcome::Generated {
        mode,
        recommendations,
        ..
    } = outcome
    else {
        panic!("expected recommendations");
    };

    assert_eq!(mode, Mode::GenreDirected);
    assert_eq!(recommendations.len(), 8);

    let pairs: HashSet<(String, String)> = recommendations
        .iter()
        .map(|r| (r.track_name.to_lowercase(), r.artist_name.to_lowercase()))
        .collect();
    assert_eq!(pairs.len(), 8);

    // old list replaced, new one written in sampler order
    assert_eq!(sink.calls[0], "delete:default");
    assert_eq!(sink.calls.len(), 9);
    let stored: Vec<&str> = sink
        .for_session("default")
        .iter()
        .map(|r| r.track_name.as_str())
        .collect();
    let returned: Vec<&str> = recommendations.iter().map(|r| r.track_name.as_str()).collect();
    assert_eq!(stored, returned);
    assert!(!stored.contains(&"Old Song"));
}

#[tokio::test]
async fn test_generate_only_replaces_own_session() {
    let catalog = rock_catalog();
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut sink = MemorySink::with_existing("other");
    let mut rng = StdRng::seed_from_u64(1);

    recommender
        .generate(&preference("rock"), &mut sink, &mut rng)
        .await
        .unwrap();

    assert_eq!(sink.for_session("other").len(), 1);
    assert_eq!(sink.for_session("default").len(), 8);
}

#[tokio::test]
async fn test_selection_is_reproducible_with_seed() {
    let catalog = rock_catalog();
    let recommender = Recommender::new(&catalog, RecommendSettings::default());

    let a = recommender
        .select(&preference("rock"), &mut StdRng::seed_from_u64(9))
        .await
        .unwrap();
    let b = recommender
        .select(&preference("rock"), &mut StdRng::seed_from_u64(9))
        .await
        .unwrap();

    assert_eq!(a.tracks, b.tracks);
    assert_eq!(a.genres.len(), 1);
    assert_eq!(a.genres[0].as_str(), "rock");
}

#[tokio::test]
async fn test_personal_mix_without_history_reports_no_recommendations() {
    let catalog = FakeCatalog::new().with_recently_played(vec![]);
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut sink = MemorySink::with_existing("default");
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = recommender
        .generate(&preference(PERSONAL_MIX), &mut sink, &mut rng)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        RecommendationOutcome::NoRecommendations {
            mode: Mode::PersonalMix,
            ..
        }
    ));

    // fell back to top tracks, then widened to the long term window
    let calls = catalog.calls();
    assert!(calls.contains(&"top_tracks:short_term".to_string()));
    assert!(calls.contains(&"top_tracks:medium_term".to_string()));
    assert!(calls.contains(&"top_tracks:long_term".to_string()));

    assert!(sink.calls.is_empty());
    assert_eq!(sink.for_session("default").len(), 1);
}

#[tokio::test]
async fn test_personal_mix_falls_back_to_top_tracks() {
    let catalog = FakeCatalog::new()
        .with_recently_played(vec![])
        .with_top_tracks(
            TimeRange::ShortTerm,
            vec![track("1", "Favourite", "Band A"), track("2", "Other", "Band B")],
        )
        .with_search(
            "artist:\"Band A\"",
            vec![track("a1", "A One", "Band A"), track("a2", "A Two", "Band A")],
        )
        .with_search("artist:\"Band B\"", vec![track("b1", "B One", "Band B")]);
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut sink = MemorySink::new();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = recommender
        .generate(&preference(PERSONAL_MIX), &mut sink, &mut rng)
        .await
        .unwrap();

    let RecommendationOutcome::Generated { recommendations, .. } = outcome else {
        panic!("expected recommendations");
    };
    assert_eq!(recommendations.len(), 3);

    // short term seeded the collection, widening only looks at the rest
    let windows: Vec<String> = catalog
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("top_tracks:"))
        .collect();
    assert_eq!(
        windows,
        vec!["top_tracks:short_term", "top_tracks:medium_term", "top_tracks:long_term"]
    );
}

#[tokio::test]
async fn test_personal_mix_with_history() {
    let catalog = FakeCatalog::new()
        .with_recently_played(vec![play("t1", "a1"), play("t2", "a2")])
        .with_artist(artist("a1", "Artist a1", &["jazz"]))
        .with_artist(artist("a2", "Artist a2", &["jazz", "soul"]))
        .with_any_search(|query, limit| {
            Ok((0..limit)
                .map(|i| track(&format!("{query}#{i}"), &format!("{query} {i}"), &format!("{query} artist {i}")))
                .collect())
        });
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut rng = StdRng::seed_from_u64(77);

    let selection = recommender
        .select(&preference(PERSONAL_MIX), &mut rng)
        .await
        .unwrap();

    assert_eq!(selection.mode, Mode::PersonalMix);
    let genres: Vec<&str> = selection.genres.iter().map(|g| g.as_str()).collect();
    assert_eq!(genres, vec!["jazz", "soul"]);
    assert_eq!(selection.tracks.len(), 10);
}

#[tokio::test]
async fn test_rate_limited_searches_leave_store_untouched() {
    let catalog = FakeCatalog::new().with_any_search(|_, _| Err(rate_limited()));
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut sink = MemorySink::with_existing("default");
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = recommender
        .generate(&preference("rock"), &mut sink, &mut rng)
        .await
        .unwrap();

    let RecommendationOutcome::NoRecommendations { mode, outcomes } = outcome else {
        panic!("expected no recommendations");
    };
    assert_eq!(mode, Mode::GenreDirected);
    // five templates plus four broader searches, all skipped for the same reason
    assert_eq!(outcomes.len(), 9);
    assert!(
        outcomes
            .iter()
            .all(|o| o.skip_reason() == Some(&SkipReason::Failed(rate_limited())))
    );

    assert!(sink.calls.is_empty());
    assert_eq!(sink.for_session("default").len(), 1);
}

#[tokio::test]
async fn test_unauthorized_aborts_without_persisting() {
    let catalog = rock_catalog()
        .with_search_error("classic rock", CatalogError::Unauthorized("expired".to_string()));
    let recommender = Recommender::new(&catalog, RecommendSettings::default());
    let mut sink = MemorySink::with_existing("default");
    let mut rng = StdRng::seed_from_u64(1);

    let result = recommender
        .generate(&preference("rock"), &mut sink, &mut rng)
        .await;

    assert!(matches!(result, Err(RecommendError::Unauthorized(_))));
    assert!(sink.calls.is_empty());
}

#[tokio::test]
async fn test_limit_setting_bounds_output() {
    let catalog = rock_catalog();
    let settings = RecommendSettings {
        limit: 3,
        ..RecommendSettings::default()
    };
    let recommender = Recommender::new(&catalog, settings);
    let mut sink = MemorySink::new();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = recommender
        .generate(&preference("rock"), &mut sink, &mut rng)
        .await
        .unwrap();

    assert_eq!(outcome.mode(), Mode::GenreDirected);
    assert_eq!(sink.for_session("default").len(), 3);
}

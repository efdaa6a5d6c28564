mod common;

use common::{track, track_by};
use spotmix::recommend::dedup::{Deduplicator, deduplicate};

#[test]
fn test_deduplicate_by_id() {
    let tracks = vec![
        track("1", "Song", "Artist"),
        track("1", "Song (Remastered)", "Artist"),
        track("2", "Other", "Artist"),
    ];

    let result = deduplicate(tracks);
    let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(result[0].name, "Song");
}

#[test]
fn test_deduplicate_by_title_and_primary_artist_case_insensitive() {
    let tracks = vec![
        track("1", "Blue Monday", "New Order"),
        track("2", "BLUE MONDAY", "new order"),
        track("3", "Blue Monday", "Orkestra"),
    ];

    let result = deduplicate(tracks);
    let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn test_deduplicate_only_primary_artist_counts() {
    let tracks = vec![
        track_by("1", "Duet", &["A", "B"]),
        track_by("2", "Duet", &["B", "A"]),
    ];

    assert_eq!(deduplicate(tracks).len(), 2);
}

#[test]
fn test_deduplicate_is_idempotent() {
    let tracks = vec![
        track("1", "One", "X"),
        track("2", "Two", "Y"),
        track("1", "One again", "X"),
        track("3", "two", "y"),
        track("4", "Four", "Z"),
    ];

    let once = deduplicate(tracks);
    let twice = deduplicate(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn test_tracks_without_id_are_keyed_by_pair() {
    let tracks = vec![
        track("", "Local Song", "Band"),
        track("", "Another", "Band"),
        track("", "local song", "band"),
    ];

    assert_eq!(deduplicate(tracks).len(), 2);
}

#[test]
fn test_seeded_deduplicator_rejects_pool_members() {
    let pool = vec![track("1", "One", "X")];
    let mut dedup = Deduplicator::seeded(&pool);

    assert!(!dedup.admit(&track("1", "Different", "Y")));
    assert!(!dedup.admit(&track("9", "one", "x")));
    assert!(dedup.admit(&track("2", "Two", "X")));
    assert!(!dedup.admit(&track("2", "Two", "X")));
}

use std::collections::HashSet;

use crate::types::Track;

/// Tracks which identifiers and (title, primary artist) pairs a run has seen.
///
/// A track is admitted only when neither its id nor its lowercased
/// (title, primary artist) pair was admitted before. Tracks without an id are
/// keyed by the pair alone.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen_ids: HashSet<String>,
    seen_pairs: HashSet<(String, String)>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing pool, e.g. before widening it.
    pub fn seeded(tracks: &[Track]) -> Self {
        let mut dedup = Self::new();
        for track in tracks {
            dedup.admit(track);
        }
        dedup
    }

    pub fn admit(&mut self, track: &Track) -> bool {
        let pair = title_artist_key(track);
        let id_seen = !track.id.is_empty() && self.seen_ids.contains(&track.id);
        if id_seen || self.seen_pairs.contains(&pair) {
            return false;
        }

        if !track.id.is_empty() {
            self.seen_ids.insert(track.id.clone());
        }
        self.seen_pairs.insert(pair);
        true
    }
}

/// Removes duplicates, keeping the first occurrence of each track.
pub fn deduplicate(tracks: Vec<Track>) -> Vec<Track> {
    let mut dedup = Deduplicator::new();
    tracks.into_iter().filter(|t| dedup.admit(t)).collect()
}

fn title_artist_key(track: &Track) -> (String, String) {
    (
        track.name.to_lowercase(),
        track.primary_artist_name().to_lowercase(),
    )
}

//! Derives genre interest from what the user recently listened to.

use std::collections::{HashMap, HashSet};

use super::{
    capability::MusicCatalog, catalog::GenreLabel, error::RecommendError, outcome::Ledger,
};

/// Distinct artists resolved per analysis.
pub const MAX_ARTISTS: usize = 20;
/// Ids per `artists` call.
pub const ARTIST_BATCH_SIZE: usize = 20;
/// Genres returned per analysis.
pub const TOP_GENRES: usize = 5;

/// Top genres of the user's recently played tracks, most frequent first.
///
/// Returns an empty list when the history is empty, unavailable, or its
/// artists carry no genre tags. Only authorization failures are returned as
/// errors.
pub async fn top_genres(
    catalog: &dyn MusicCatalog,
    limit: u32,
    ledger: &mut Ledger,
) -> Result<Vec<GenreLabel>, RecommendError> {
    let label = format!("recently played ({limit})");
    let Some(history) = ledger.check(&label, catalog.recently_played(limit).await)? else {
        return Ok(Vec::new());
    };

    if history.is_empty() {
        ledger.skip_empty(&label);
        log::info!("No recently played tracks, cannot derive genres");
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let artist_ids: Vec<String> = history
        .iter()
        .flat_map(|item| item.track.artists.iter())
        .filter_map(|artist| artist.id.clone())
        .filter(|id| seen.insert(id.clone()))
        .take(MAX_ARTISTS)
        .collect();

    let mut tags: Vec<String> = Vec::new();
    for batch in artist_ids.chunks(ARTIST_BATCH_SIZE) {
        let label = format!("artists batch ({} ids)", batch.len());
        let Some(artists) = ledger.check(&label, catalog.artists(batch).await)? else {
            continue;
        };

        ledger.record(&label, artists.len(), artists.len());
        tags.extend(artists.into_iter().flat_map(|a| a.genres));
    }

    let genres = rank_genres(tags.iter().map(String::as_str), TOP_GENRES);
    if genres.is_empty() {
        log::info!("No genre tags found on recently played artists");
    } else {
        log::info!(
            "Top genres from listening history: {}",
            genres
                .iter()
                .map(GenreLabel::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(genres)
}

/// Tallies genre tags and returns the `top` most frequent ones.
///
/// Ordering is by descending count; equal counts keep the order in which the
/// genre was first encountered.
pub fn rank_genres<'a>(tags: impl IntoIterator<Item = &'a str>, top: usize) -> Vec<GenreLabel> {
    let mut tally: Vec<(GenreLabel, usize)> = Vec::new();
    let mut index: HashMap<GenreLabel, usize> = HashMap::new();

    for tag in tags {
        let genre = GenreLabel::new(tag);
        if genre.is_empty() {
            continue;
        }

        match index.get(&genre) {
            Some(&i) => tally[i].1 += 1,
            None => {
                index.insert(genre.clone(), tally.len());
                tally.push((genre, 1));
            }
        }
    }

    // sort_by is stable, first-seen order survives among ties
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally.into_iter().take(top).map(|(genre, _)| genre).collect()
}

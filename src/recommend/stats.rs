//! Summary of a user's recent listening (top tracks, artists and genres).

use crate::types::TimeRange;

use super::{
    analyzer::rank_genres,
    capability::{CatalogError, MusicCatalog},
    catalog::GenreLabel,
};

const TOP_N: usize = 5;
/// Below this many short-term entries the list is topped up from medium term.
const TOP_UP_BELOW: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListeningStats {
    /// "Artist A, Artist B - Title"
    pub top_tracks: Vec<String>,
    pub top_artists: Vec<String>,
    pub top_genres: Vec<GenreLabel>,
}

/// Collects the user's top 5 tracks, artists and genres of the last weeks.
///
/// Genres are ranked from the short-term top artists only. Failures of the
/// medium-term top-up are ignored.
pub async fn listening_stats(catalog: &dyn MusicCatalog) -> Result<ListeningStats, CatalogError> {
    let tracks = catalog.top_tracks(TOP_N as u32, TimeRange::ShortTerm).await?;
    let artists = catalog.top_artists(TOP_N as u32, TimeRange::ShortTerm).await?;

    let mut top_tracks: Vec<String> = tracks.iter().map(|t| t.display_name()).collect();
    let mut top_artists: Vec<String> = artists.iter().map(|a| a.name.clone()).collect();
    let top_genres = rank_genres(
        artists.iter().flat_map(|a| a.genres.iter().map(String::as_str)),
        TOP_N,
    );

    if top_tracks.len() < TOP_UP_BELOW {
        match catalog.top_tracks(10, TimeRange::MediumTerm).await {
            Ok(more) => top_up(&mut top_tracks, more.iter().map(|t| t.display_name())),
            Err(e) => log::debug!("Medium term top tracks unavailable: {}", e),
        }
    }

    if top_artists.len() < TOP_UP_BELOW {
        match catalog.top_artists(10, TimeRange::MediumTerm).await {
            Ok(more) => top_up(&mut top_artists, more.into_iter().map(|a| a.name)),
            Err(e) => log::debug!("Medium term top artists unavailable: {}", e),
        }
    }

    top_tracks.truncate(TOP_N);
    top_artists.truncate(TOP_N);

    Ok(ListeningStats {
        top_tracks,
        top_artists,
        top_genres,
    })
}

fn top_up(list: &mut Vec<String>, candidates: impl Iterator<Item = String>) {
    for candidate in candidates {
        if list.len() >= TOP_N {
            break;
        }
        if !list.contains(&candidate) {
            list.push(candidate);
        }
    }
}

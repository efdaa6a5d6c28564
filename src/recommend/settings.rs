/// Preference value that selects the listening-history driven mode.
pub const PERSONAL_MIX: &str = "personal_mix";

/// Bounds for one recommendation run.
///
/// These counts are the pipeline's only guard against unbounded latency: every
/// loop over templates, genres, artists or time windows is capped by one of
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendSettings {
    /// Number of tracks to recommend.
    pub limit: usize,
    /// Max accepted tracks per artist during collection.
    pub saturation_cap: usize,
    /// Recently played items fed to the analyzer.
    pub recently_played_limit: u32,
    /// Extra randomly chosen variant searches per genre template (0 disables).
    pub variants_per_template: usize,
    /// Genre templates used per run.
    pub max_templates: usize,
    pub template_result_limit: u32,
    pub variant_result_limit: u32,
    /// Result limit of the per-genre strategy search in personal-mix mode.
    pub strategy_result_limit: u32,
    pub widening_result_limit: u32,
    /// Top artists seeding album lookups in personal-mix mode.
    pub top_artist_seeds: usize,
    /// Recently played artists seeding searches in personal-mix mode.
    pub recent_artist_seeds: usize,
    /// Top tracks fetched per window when no genres could be derived.
    pub top_tracks_limit: u32,
    /// Result limit of each artist-seeded search.
    pub seed_search_limit: u32,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            limit: 10,
            saturation_cap: 2,
            recently_played_limit: 50,
            variants_per_template: 0,
            max_templates: 5,
            template_result_limit: 5,
            variant_result_limit: 3,
            strategy_result_limit: 4,
            widening_result_limit: 5,
            top_artist_seeds: 5,
            recent_artist_seeds: 5,
            top_tracks_limit: 20,
            seed_search_limit: 3,
        }
    }
}

//! Static query catalog.
//!
//! The search endpoint has no reliable genre filter, so variety comes from
//! searching several textual variants of a genre instead of the bare label.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::settings::PERSONAL_MIX;

/// Lowercased, trimmed genre name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenreLabel(String);

impl GenreLabel {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_personal_mix(&self) -> bool {
        self.0 == PERSONAL_MIX
    }
}

impl fmt::Display for GenreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GenreLabel {
    fn from(raw: &str) -> Self {
        GenreLabel::new(raw)
    }
}

const CATALOG: &[(&str, &[&str])] = &[
    ("rock", &["rock", "indie rock", "alternative rock", "classic rock", "hard rock"]),
    ("pop", &["pop", "indie pop", "dance pop", "electropop", "synth pop"]),
    ("jazz", &["jazz", "smooth jazz", "bebop", "contemporary jazz", "fusion"]),
    ("hip-hop", &["hip hop", "rap", "trap", "conscious hip hop", "old school hip hop"]),
    (
        "classical",
        &["classical", "orchestra", "piano classical", "baroque", "romantic classical"],
    ),
    (
        "electronic",
        &["electronic", "house", "techno", "ambient", "downtempo", "edm"],
    ),
    ("reggae", &["reggae", "dub", "ska", "roots reggae", "dancehall"]),
    (
        "metal",
        &["metal", "heavy metal", "death metal", "black metal", "progressive metal"],
    ),
    (
        "blues",
        &["blues", "delta blues", "electric blues", "blues rock", "chicago blues"],
    ),
    (
        "country",
        &["country", "country rock", "folk country", "bluegrass", "americana"],
    ),
];

/// Canonical labels in catalog order.
pub fn canonical_genres() -> Vec<&'static str> {
    CATALOG.iter().map(|(label, _)| *label).collect()
}

pub fn is_canonical(label: &GenreLabel) -> bool {
    lookup(label).is_some()
}

/// Search templates for `label`, or `[label]` when the label is unknown.
pub fn templates_for(label: &GenreLabel) -> Vec<String> {
    match lookup(label) {
        Some(templates) => templates.iter().map(|t| t.to_string()).collect(),
        None => vec![label.as_str().to_string()],
    }
}

/// Query strategies of which personal-mix mode picks one per genre.
pub fn strategy_variants(label: &GenreLabel) -> Vec<String> {
    let g = label.as_str();
    vec![
        format!("{g} NOT mainstream"),
        format!("{g} indie"),
        format!("{g} underground"),
        format!("genre:\"{g}\""),
        format!("{g} popular"),
    ]
}

/// Variants of a single genre template, sampled when
/// `variants_per_template` is enabled.
pub fn template_variants(template: &str) -> Vec<String> {
    let mut variants = strategy_variants(&GenreLabel::new(template));
    variants.push(format!("{template} new"));
    variants.push(format!("{template} alternative"));
    variants
}

/// Less specific queries used when the pool is short of the target.
pub fn broader_templates(label: &GenreLabel) -> Vec<String> {
    let g = label.as_str();
    vec![
        format!("{g} music"),
        format!("{g} songs"),
        format!("best {g}"),
        format!("{g} hits"),
    ]
}

fn lookup(label: &GenreLabel) -> Option<&'static [&'static str]> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == label.as_str())
        .map(|(_, templates)| *templates)
}

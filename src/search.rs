//! Query engine: free-text search over the plant table.
//!
//! Every mode is a case-insensitive substring match against one or more
//! fields; the result is the unordered set of matching scientific names.
//! Note the asymmetry with the region index, which matches case-sensitively
//! when placing plants into provinces. The source data relies on it, so it
//! is preserved rather than normalized away.

use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::data::PlantRecord;

/// Which field(s) the query text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Medicinal-use text.
    Disease,
    /// Vietnamese, scientific, or synonym name.
    Plant,
    /// Plant family.
    Family,
}

impl FromStr for SearchMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disease" => Ok(SearchMode::Disease),
            "plant" => Ok(SearchMode::Plant),
            "family" => Ok(SearchMode::Family),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown search mode '{0}', expected disease|plant|family")]
pub struct UnknownMode(String);

/// Scientific names of all records matching the query.
///
/// Absent matches give an empty set, never an error. An empty query matches
/// every record; the UI boundary is responsible for not submitting one.
pub fn search(plants: &[PlantRecord], mode: SearchMode, query: &str) -> FxHashSet<String> {
    let needle = query.to_lowercase();

    plants
        .iter()
        .filter(|p| match mode {
            SearchMode::Disease => contains_ci(&p.uses, &needle),
            SearchMode::Plant => {
                contains_ci(&p.vietnamese_name, &needle)
                    || contains_ci(&p.scientific_name, &needle)
                    || contains_ci(&p.synonym_name, &needle)
            }
            SearchMode::Family => contains_ci(&p.family, &needle),
        })
        .map(|p| p.scientific_name.clone())
        .collect()
}

/// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

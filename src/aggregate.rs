//! Per-province aggregation of search results into heatmap input.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::region_index::RegionIndex;

/// A coordinate with a match count, consumed directly by the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub weight: u32,
}

impl WeightedPoint {
    /// `[lat, lon, weight]` triple, the shape the heatmap layer expects.
    pub fn as_triple(&self) -> [f64; 3] {
        [self.latitude, self.longitude, f64::from(self.weight)]
    }
}

/// One point per region holding at least one matched plant, weighted by the
/// number of matched entries in that region's list (duplicate entries each
/// count). Regions without matches are omitted; output order follows the
/// region index.
pub fn aggregate(matched: &FxHashSet<String>, index: &RegionIndex) -> Vec<WeightedPoint> {
    index
        .iter()
        .filter_map(|entry| {
            let weight = entry
                .plants
                .iter()
                .filter(|p| matched.contains(p.as_str()))
                .count() as u32;

            (weight > 0).then_some(WeightedPoint {
                latitude: entry.latitude,
                longitude: entry.longitude,
                weight,
            })
        })
        .collect()
}

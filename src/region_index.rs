//! Inverted index from province to the plants distributed there.
//!
//! Built once per process by scanning every plant's free-text distribution
//! field for every known province name. The scan is O(provinces × plants);
//! both collections are bounded by the size of a national geography, so no
//! smarter index is warranted.

use rustc_hash::FxHashMap;

use crate::data::{PlantRecord, ProvinceCoordinate};

/// One province with its coordinate and the plants found there, in plant
/// table order.
#[derive(Debug, Clone)]
pub struct RegionEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub plants: Vec<String>,
}

/// Province name → coordinate + plant list, iterated in province table
/// order. Read-only after construction.
#[derive(Debug, Default)]
pub struct RegionIndex {
    entries: Vec<RegionEntry>,
    by_name: FxHashMap<String, usize>,
}

impl RegionIndex {
    /// Build the index.
    ///
    /// Matching is a case-sensitive substring test of the province name
    /// against the distribution text. A province name contained in a longer
    /// place name therefore over-matches ("Hanoi" matches "Hanoian
    /// province"); that imprecision is part of the matching contract.
    ///
    /// Duplicate province names keep their first position in the iteration
    /// order; the later coordinate wins.
    pub fn build(plants: &[PlantRecord], provinces: &[ProvinceCoordinate]) -> Self {
        let mut index = RegionIndex::default();

        for province in provinces {
            match index.by_name.get(&province.name) {
                Some(&slot) => {
                    index.entries[slot].latitude = province.latitude;
                    index.entries[slot].longitude = province.longitude;
                }
                None => {
                    index.by_name.insert(province.name.clone(), index.entries.len());
                    index.entries.push(RegionEntry {
                        name: province.name.clone(),
                        latitude: province.latitude,
                        longitude: province.longitude,
                        plants: Vec::new(),
                    });
                }
            }
        }

        for plant in plants {
            for entry in &mut index.entries {
                if plant.distribution.contains(&entry.name) {
                    entry.plants.push(plant.scientific_name.clone());
                }
            }
        }

        tracing::debug!(
            provinces = index.entries.len(),
            placements = index.entries.iter().map(|e| e.plants.len()).sum::<usize>(),
            "region index built"
        );

        index
    }

    /// Entries in province table order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.iter()
    }

    pub fn get(&self, province: &str) -> Option<&RegionEntry> {
        self.by_name.get(province).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plant(scientific: &str, distribution: &str) -> PlantRecord {
        PlantRecord {
            scientific_name: scientific.to_string(),
            vietnamese_name: String::new(),
            synonym_name: String::new(),
            family: String::new(),
            uses: String::new(),
            distribution: distribution.to_string(),
        }
    }

    fn province(name: &str, lat: f64, lon: f64) -> ProvinceCoordinate {
        ProvinceCoordinate {
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn places_plants_by_substring() {
        let plants = vec![
            plant("Aloe vera", "Hanoi, Hue"),
            plant("Curcuma longa", "Hue"),
        ];
        let provinces = vec![province("Hanoi", 21.0, 105.8), province("Hue", 16.4, 107.6)];

        let index = RegionIndex::build(&plants, &provinces);
        assert_eq!(index.get("Hanoi").unwrap().plants, vec!["Aloe vera"]);
        assert_eq!(
            index.get("Hue").unwrap().plants,
            vec!["Aloe vera", "Curcuma longa"]
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let plants = vec![plant("Aloe vera", "hanoi")];
        let provinces = vec![province("Hanoi", 21.0, 105.8)];

        let index = RegionIndex::build(&plants, &provinces);
        assert!(index.get("Hanoi").unwrap().plants.is_empty());
    }

    #[test]
    fn substring_rule_over_matches_longer_place_names() {
        // "Hanoian province" contains "Hanoi"; the literal substring rule
        // matches it, and that is the asserted behavior.
        let plants = vec![plant("Aloe vera", "Hanoian province")];
        let provinces = vec![province("Hanoi", 21.0, 105.8)];

        let index = RegionIndex::build(&plants, &provinces);
        assert_eq!(index.get("Hanoi").unwrap().plants, vec!["Aloe vera"]);
    }

    #[test]
    fn duplicate_province_is_last_write_wins() {
        let provinces = vec![
            province("Hue", 0.0, 0.0),
            province("Hanoi", 21.0, 105.8),
            province("Hue", 16.4, 107.6),
        ];

        let index = RegionIndex::build(&[], &provinces);
        assert_eq!(index.len(), 2);

        let entry = index.get("Hue").unwrap();
        assert_relative_eq!(entry.latitude, 16.4);
        assert_relative_eq!(entry.longitude, 107.6);

        // First occurrence keeps its slot in the iteration order.
        let names: Vec<&str> = index.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Hue", "Hanoi"]);
    }

    #[test]
    fn empty_plant_table_yields_empty_lists() {
        let provinces = vec![province("Hanoi", 21.0, 105.8)];
        let index = RegionIndex::build(&[], &provinces);
        assert_eq!(index.len(), 1);
        assert!(index.get("Hanoi").unwrap().plants.is_empty());
    }
}

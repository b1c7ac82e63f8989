//! Province-level distribution heatmaps for Vietnamese medicinal plants.
//!
//! Given a static table of plants (botanical names, family, medicinal uses,
//! free-text distribution) and a table of province coordinates, the crate
//! answers free-text queries by disease, plant name, or family and
//! aggregates the matches into weighted points per province, rendered as a
//! heatmap over a map of Vietnam.
//!
//! Pipeline: `data` (load) → `region_index` (build once) → per query:
//! `search` → `aggregate` → `map` (render). The `web` feature adds the
//! axum front end.

pub mod aggregate;
pub mod config;
pub mod data;
pub mod error;
pub mod map;
pub mod region_index;
pub mod search;

#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use aggregate::{aggregate, WeightedPoint};
pub use config::DataPaths;
pub use data::{Dataset, GeoBoundary, PlantRecord, ProvinceCoordinate};
pub use error::DataError;
pub use map::MapView;
pub use region_index::RegionIndex;
pub use search::{search, SearchMode};

#[cfg(feature = "web")]
pub use web::{create_router, AppState};

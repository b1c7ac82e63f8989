//! Locations of the persisted inputs.
//!
//! The dataset ships as three files with fixed names; only the base
//! directory moves between local development and deployment.

use std::path::{Path, PathBuf};

/// Name of the country feature selected from the boundary document.
pub const COUNTRY_FEATURE: &str = "Vietnam";

/// Fixed paths to the plant table, province table, and boundary geometry.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub plants: PathBuf,
    pub provinces: PathBuf,
    pub boundary: PathBuf,
}

impl DataPaths {
    /// Standard file names resolved against a base directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        DataPaths {
            plants: dir.join("clean.csv"),
            provinces: dir.join("vietnam_provinces.csv"),
            boundary: dir.join("vn.json"),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths::from_dir("data")
    }
}

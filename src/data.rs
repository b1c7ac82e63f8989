//! Dataset loading.
//!
//! Reads the plant table and province table with Polars and the country
//! boundary with serde_json, converting everything into typed records once
//! at load time. Column lookup by string name stops here; the rest of the
//! crate only sees `PlantRecord`, `ProvinceCoordinate`, and `GeoBoundary`.

use std::path::Path;

use polars::prelude::*;
use serde::Serialize;

use crate::config::{DataPaths, COUNTRY_FEATURE};
use crate::error::DataError;

// Column headers as they appear in the source CSVs.
const COL_SCIENTIFIC: &str = "Tên khoa học";
const COL_VIETNAMESE: &str = "Tên tiếng Việt";
const COL_SYNONYM: &str = "Tên đồng nghĩa";
const COL_FAMILY: &str = "Họ thực vật";
const COL_USES: &str = "Công dụng";
const COL_DISTRIBUTION: &str = "Phân bố";
const COL_PROVINCE: &str = "Tỉnh Thành";
const COL_LATITUDE: &str = "Latitude";
const COL_LONGITUDE: &str = "Longitude";

/// Sentinel in the distribution column meaning "no distribution data".
const NO_DISTRIBUTION: &str = "0";

/// One row of the plant table. The scientific name is the join key
/// everywhere else; missing optional fields are empty strings.
#[derive(Debug, Clone, Serialize)]
pub struct PlantRecord {
    pub scientific_name: String,
    pub vietnamese_name: String,
    pub synonym_name: String,
    pub family: String,
    pub uses: String,
    pub distribution: String,
}

/// One row of the province table.
#[derive(Debug, Clone, Serialize)]
pub struct ProvinceCoordinate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A single named GeoJSON feature, kept as raw JSON for pass-through
/// embedding into the map document.
#[derive(Debug, Clone)]
pub struct GeoBoundary {
    pub name: String,
    pub feature: serde_json::Value,
}

/// Everything loaded from disk, immutable for the process lifetime.
pub struct Dataset {
    pub plants: Vec<PlantRecord>,
    pub provinces: Vec<ProvinceCoordinate>,
    pub boundary: Option<GeoBoundary>,
}

impl Dataset {
    /// Load all inputs. A missing boundary *feature* is non-fatal (the
    /// outline overlay is skipped); everything else is.
    pub fn load(paths: &DataPaths) -> Result<Self, DataError> {
        let plants = load_plants(&paths.plants)?;
        let provinces = load_provinces(&paths.provinces)?;

        let boundary = match load_boundary(&paths.boundary, COUNTRY_FEATURE) {
            Ok(boundary) => Some(boundary),
            Err(DataError::BoundaryNotFound { name }) => {
                tracing::warn!("boundary feature '{}' missing, outline disabled", name);
                None
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            plants = plants.len(),
            provinces = provinces.len(),
            boundary = boundary.is_some(),
            "dataset loaded"
        );

        Ok(Dataset {
            plants,
            provinces,
            boundary,
        })
    }
}

/// Load the plant table.
///
/// Rows whose distribution field carries the `"0"` sentinel are dropped,
/// as are rows without a scientific name. All other rows pass through
/// unfiltered, with nulls replaced by empty strings.
pub fn load_plants(path: &Path) -> Result<Vec<PlantRecord>, DataError> {
    let df = read_csv(path)?;

    let scientific = str_column(&df, path, COL_SCIENTIFIC)?;
    let vietnamese = str_column(&df, path, COL_VIETNAMESE)?;
    let synonym = str_column(&df, path, COL_SYNONYM)?;
    let family = str_column(&df, path, COL_FAMILY)?;
    let uses = str_column(&df, path, COL_USES)?;
    let distribution = str_column(&df, path, COL_DISTRIBUTION)?;

    let mut plants = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if distribution[idx] == NO_DISTRIBUTION || scientific[idx].is_empty() {
            continue;
        }
        plants.push(PlantRecord {
            scientific_name: scientific[idx].clone(),
            vietnamese_name: vietnamese[idx].clone(),
            synonym_name: synonym[idx].clone(),
            family: family[idx].clone(),
            uses: uses[idx].clone(),
            distribution: distribution[idx].clone(),
        });
    }

    Ok(plants)
}

/// Load the province table in file order.
pub fn load_provinces(path: &Path) -> Result<Vec<ProvinceCoordinate>, DataError> {
    let df = read_csv(path)?;

    let names = str_column(&df, path, COL_PROVINCE)?;
    let latitudes = f64_column(&df, path, COL_LATITUDE)?;
    let longitudes = f64_column(&df, path, COL_LONGITUDE)?;

    let mut provinces = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        provinces.push(ProvinceCoordinate {
            name: names[idx].clone(),
            latitude: latitudes[idx],
            longitude: longitudes[idx],
        });
    }

    Ok(provinces)
}

/// Load the boundary document and select the feature named `feature_name`.
pub fn load_boundary(path: &Path, feature_name: &str) -> Result<GeoBoundary, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound { path: path.into() });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| DataError::format(path, e))?;
    let doc: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| DataError::format(path, e))?;

    let features = doc["features"]
        .as_array()
        .ok_or_else(|| DataError::format(path, "missing 'features' array"))?;

    let feature = features
        .iter()
        .find(|f| f["properties"]["name"].as_str() == Some(feature_name))
        .ok_or_else(|| DataError::BoundaryNotFound {
            name: feature_name.to_string(),
        })?;

    Ok(GeoBoundary {
        name: feature_name.to_string(),
        feature: feature.clone(),
    })
}

fn read_csv(path: &Path) -> Result<DataFrame, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound { path: path.into() });
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .map_err(|e| DataError::format(path, e))?
        .finish()
        .map_err(|e| DataError::format(path, e))
}

/// Extract a column as strings, nulls filled with `""`. The cast covers
/// columns Polars inferred as numeric (e.g. an all-`0` distribution column).
fn str_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<String>, DataError> {
    let column = df
        .column(name)
        .map_err(|_| DataError::format(path, format!("missing column '{}'", name)))?
        .cast(&DataType::String)
        .map_err(|e| DataError::format(path, e))?;

    let values = column.str().map_err(|e| DataError::format(path, e))?;

    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect())
}

fn f64_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<f64>, DataError> {
    let column = df
        .column(name)
        .map_err(|_| DataError::format(path, format!("missing column '{}'", name)))?
        .cast(&DataType::Float64)
        .map_err(|e| DataError::format(path, e))?;

    let values = column.f64().map_err(|e| DataError::format(path, e))?;

    values
        .into_iter()
        .map(|v| v.ok_or_else(|| DataError::format(path, format!("null value in '{}'", name))))
        .collect()
}

// crates/nzaddr-core/src/loader/mod.rs

//! # Input / Output
//!
//! Handles the physical layer (files, decompression) and delegates to the
//! format parsers: locality JSON, GeoJSON and CSV.

use crate::error::Result;
use crate::model::LocalitiesRaw;
use std::path::Path;

pub mod common_io;
pub mod csv_io;

pub use common_io::open_stream;
pub use csv_io::{read_table_csv, write_hierarchy, write_regions, write_rows};

/// Reads the TradeMe localities document.
///
/// Any missing file or malformed JSON is fatal for the run.
pub fn read_localities(path: impl AsRef<Path>) -> Result<LocalitiesRaw> {
    let reader = open_stream(path.as_ref())?;
    let raw: LocalitiesRaw = serde_json::from_reader(reader)?;
    Ok(raw)
}

/// Reads a GeoJSON `FeatureCollection` (e.g. `suburbs_with_geometry.geojson`).
pub fn read_feature_collection(path: impl AsRef<Path>) -> Result<geojson::FeatureCollection> {
    let reader = open_stream(path.as_ref())?;
    let collection = geojson::FeatureCollection::try_from(geojson::GeoJson::from_reader(reader)?)?;
    Ok(collection)
}

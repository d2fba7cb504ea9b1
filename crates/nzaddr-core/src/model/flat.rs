// crates/nzaddr-core/src/model/flat.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Renders a source district id as its fixed-width code (`7` -> `D0007`).
pub fn district_code(district_id: u32) -> String {
    format!("D{district_id:04}")
}

/// Renders a source suburb id as its fixed-width code (`42` -> `S00042`).
pub fn suburb_code(suburb_id: u32) -> String {
    format!("S{suburb_id:05}")
}

/// A row of `regions.csv` / `nz_addresses.regions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRow {
    pub region_id: String,
    pub name: String,
}

/// A row of `districts.csv` / `nz_addresses.districts`.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictRow {
    pub district_id: String,
    pub region_id: String,
    pub name: String,
    pub display_name: String,
}

/// A row of `suburbs.csv` / `nz_addresses.suburbs`.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuburbRow {
    pub suburb_id: String,
    pub district_id: String,
    pub name: String,
    pub is_major_suburb: bool,
    pub population_category: PopulationCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationCategory {
    High,
    Medium,
    Low,
}

impl fmt::Display for PopulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PopulationCategory::High => "high",
            PopulationCategory::Medium => "medium",
            PopulationCategory::Low => "low",
        };
        f.write_str(s)
    }
}

/// Classification stamped on every suburb of a source.
///
/// The source does not carry these attributes itself; they describe how the
/// source was curated. TradeMe only lists popular localities, hence
/// [`SuburbClassification::trademe`]. A source with real population data
/// should pass its own classification instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuburbClassification {
    pub is_major_suburb: bool,
    pub population_category: PopulationCategory,
}

impl SuburbClassification {
    pub const fn trademe() -> Self {
        Self {
            is_major_suburb: true,
            population_category: PopulationCategory::High,
        }
    }
}

impl Default for SuburbClassification {
    fn default() -> Self {
        Self::trademe()
    }
}

/// The flattened hierarchy, ready for CSV output or bulk load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    /// Districts in source order.
    pub districts: Vec<DistrictRow>,
    /// Suburbs in source order.
    pub suburbs: Vec<SuburbRow>,
    /// Region names that were not in the lookup table and were skipped
    /// together with all of their districts and suburbs.
    pub skipped_regions: Vec<String>,
}

impl Hierarchy {
    pub fn stats(&self) -> crate::common::HierarchyStats {
        crate::common::HierarchyStats {
            districts: self.districts.len(),
            suburbs: self.suburbs.len(),
        }
    }
}

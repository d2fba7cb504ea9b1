// crates/nzaddr-core/src/model/regions.rs

//! # Region Registry
//!
//! The regions table is keyed by fixed codes (`R01`..`R15`) that were
//! assigned once, by hand, when the table was seeded. The TradeMe dump only
//! carries region *names*, so districts are attached to regions through the
//! exact-match table below.

use super::flat::RegionRow;
use super::raw::LocalityRaw;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Name of the synthetic aggregate locality that is not a real region.
pub const AGGREGATE_LOCALITY: &str = "All";

/// `(name, region_id)` in region-id order.
pub const NZ_REGIONS: [(&str, &str); 15] = [
    ("Northland", "R01"),
    ("Auckland", "R02"),
    ("Waikato", "R03"),
    ("Bay Of Plenty", "R04"),
    ("Gisborne", "R05"),
    ("Hawke's Bay", "R06"),
    ("Taranaki", "R07"),
    ("Manawatu / Whanganui", "R08"),
    ("Wellington", "R09"),
    ("Nelson / Tasman", "R10"),
    ("Marlborough", "R11"),
    ("West Coast", "R12"),
    ("Canterbury", "R13"),
    ("Otago", "R14"),
    ("Southland", "R15"),
];

static REGION_IDS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| NZ_REGIONS.iter().copied().collect());

/// Exact-match lookup of a region id by name. Case and whitespace matter.
pub fn region_id(name: &str) -> Option<&'static str> {
    REGION_IDS.get(name).copied()
}

/// What to do with a region name that is not in [`NZ_REGIONS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegionPolicy {
    /// Warn and drop the region with everything under it.
    #[default]
    Skip,
    /// Reject the whole source before emitting anything.
    Strict,
}

/// Region names in `localities` that the registry cannot resolve, in source
/// order. The `All` aggregate is never reported.
pub fn unknown_regions(localities: &[LocalityRaw]) -> Vec<String> {
    localities
        .iter()
        .map(|l| l.name.as_str())
        .filter(|name| *name != AGGREGATE_LOCALITY && region_id(name).is_none())
        .map(str::to_string)
        .collect()
}

/// Derives region rows straight from the localities list.
///
/// Ids are positional (`R{nn}`, 1-based over the whole list, so the slot of
/// a skipped `All` entry is not reused) and rows are sorted by name.
pub fn extract_regions(localities: &[LocalityRaw]) -> Vec<RegionRow> {
    let mut regions: Vec<RegionRow> = localities
        .iter()
        .enumerate()
        .filter(|(_, l)| l.name != AGGREGATE_LOCALITY)
        .map(|(idx, l)| RegionRow {
            region_id: format!("R{:02}", idx + 1),
            name: l.name.clone(),
        })
        .collect();
    regions.sort_by(|a, b| a.name.cmp(&b.name));
    regions
}

/// The registry itself as region rows, in id order.
pub fn registry_rows() -> Vec<RegionRow> {
    NZ_REGIONS
        .iter()
        .map(|(name, id)| RegionRow {
            region_id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

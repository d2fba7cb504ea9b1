// crates/nzaddr-core/src/model/mod.rs
pub mod convert;
pub mod flat;
pub mod raw;
pub mod regions;

pub use convert::flatten;
pub use flat::{
    district_code, suburb_code, DistrictRow, Hierarchy, PopulationCategory, RegionRow,
    SuburbClassification, SuburbRow,
};
pub use raw::{DistrictRaw, LocalitiesRaw, LocalityRaw, SuburbRaw};
pub use regions::{extract_regions, region_id, RegionPolicy};

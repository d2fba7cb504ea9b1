// crates/nzaddr-core/src/lib.rs

//! # nzaddr-core
//!
//! Builds the NZ address hierarchy (regions, districts, suburbs) and
//! enriches it with suburb polygons and centroids.
//!
//! - [`model`]: TradeMe localities -> flat district / suburb rows.
//! - [`loader`]: reading inputs, writing CSVs.
//! - [`import`]: CSV rows and GeoJSON polygons into PostgreSQL.
//! - [`enrich`]: Nominatim centroids for suburbs that lack one.
//!
//! Everything is synchronous and sequential; each run owns one database
//! connection or one `psql` process at a time.

pub mod common;
pub mod config;
pub mod enrich;
pub mod error;
pub mod geocode;
pub mod import;
pub mod loader;
pub mod model;
pub mod sql;
pub mod table;

// Re-exports
pub use crate::common::{Coverage, HierarchyStats};
pub use crate::config::DbLayout;
pub use crate::error::{EtlError, Result};
pub use crate::model::{
    flatten, DistrictRow, Hierarchy, PopulationCategory, RegionPolicy, RegionRow,
    SuburbClassification, SuburbRow,
};
pub use crate::sql::{PsqlCommand, SqlExecutor};
pub use crate::table::Table;

// crates/nzaddr-core/src/error.rs
use thiserror::Error;

/// Fatal failures of an ETL run.
///
/// Per-item problems (an unknown region, a geocoder miss) never surface as
/// an `EtlError`; they are logged and tallied in the run's report instead.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown region names in source: {}", .0.join(", "))]
    UnknownRegions(Vec<String>),

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[cfg(feature = "pg")]
    #[error("database error: {0}")]
    Database(#[from] postgres::Error),

    #[cfg(feature = "geocode")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("psql process failed: {0}")]
    Process(String),

    #[error("batch {batch} failed after {committed} committed updates: {source}")]
    BatchFailed {
        batch: usize,
        committed: usize,
        #[source]
        source: Box<EtlError>,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;

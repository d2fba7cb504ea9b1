// crates/nzaddr-core/src/geocode/mod.rs

//! # Geocoding
//!
//! Free-text place search returning a single best-match WGS84 point.

use crate::error::{EtlError, Result};
use serde::Deserialize;

#[cfg(feature = "geocode")]
pub mod nominatim;

#[cfg(feature = "geocode")]
pub use nominatim::{NominatimClient, NominatimConfig};

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Resolves a free-text place query to its best match.
///
/// `Ok(None)` is a clean miss; `Err` is a failed request. Callers treat both
/// as a per-row failure.
pub trait Geocoder {
    fn locate(&mut self, query: &str) -> Result<Option<GeoPoint>>;
}

impl<G: Geocoder + ?Sized> Geocoder for &mut G {
    fn locate(&mut self, query: &str) -> Result<Option<GeoPoint>> {
        (**self).locate(query)
    }
}

/// Search text for a suburb: `"<suburb>, <district>, New Zealand"`.
pub fn place_query(suburb: &str, district: &str) -> String {
    format!("{suburb}, {district}, New Zealand")
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Parses a Nominatim `format=json` search response, keeping the first hit.
///
/// Nominatim sends coordinates as strings.
pub fn parse_search_response(body: &str) -> Result<Option<GeoPoint>> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;
    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };
    let lat = hit
        .lat
        .parse()
        .map_err(|_| EtlError::InvalidData(format!("bad latitude '{}'", hit.lat)))?;
    let lon = hit
        .lon
        .parse()
        .map_err(|_| EtlError::InvalidData(format!("bad longitude '{}'", hit.lon)))?;
    Ok(Some(GeoPoint { lat, lon }))
}

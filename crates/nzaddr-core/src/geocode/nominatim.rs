// crates/nzaddr-core/src/geocode/nominatim.rs
use super::{parse_search_response, GeoPoint, Geocoder};
use crate::error::Result;
use std::time::Duration;
use tracing::debug;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const USER_AGENT: &str = "NZ-Addresses-ETL/1.0";

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    /// Per-request socket timeout.
    pub timeout: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Blocking Nominatim search client. Does no pacing of its own; see
/// [`Throttle`](crate::enrich::Throttle).
pub struct NominatimClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl Geocoder for NominatimClient {
    fn locate(&mut self, query: &str) -> Result<Option<GeoPoint>> {
        debug!(query, "nominatim search");
        let body = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()?
            .error_for_status()?
            .text()?;
        parse_search_response(&body)
    }
}

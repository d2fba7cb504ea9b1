// crates/nzaddr-core/src/enrich/mod.rs

//! # Centroid Enrichment
//!
//! Fills `suburbs.centroid` for rows that have none: geocode the suburb,
//! reproject the hit into the centroid SRID, write it back. One row at a
//! time, at most one geocoder request per [`EnrichConfig::delay`].

use crate::common::Coverage;
use crate::error::Result;
use crate::geocode::{place_query, GeoPoint, Geocoder};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[cfg(feature = "pg")]
mod pg;

#[cfg(feature = "pg")]
pub use pg::PgCentroidStore;

/// Slightly over Nominatim's one-request-per-second policy.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1100);

/// A suburb still missing its centroid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSuburb {
    pub suburb_id: String,
    pub name: String,
    pub district_name: String,
}

/// Storage side of the enrichment pass.
pub trait CentroidStore {
    /// Suburbs whose centroid is NULL, ordered by district name then name.
    fn pending(&mut self) -> Result<Vec<PendingSuburb>>;

    /// Reprojects a WGS84 point into the centroid SRID and returns it as
    /// WKT. `Ok(None)` means the transform produced nothing.
    fn project(&mut self, point: GeoPoint) -> Result<Option<String>>;

    /// Writes the centroid of one suburb (WKT in the centroid SRID).
    fn set_centroid(&mut self, suburb_id: &str, wkt: &str) -> Result<()>;

    fn coverage(&mut self) -> Result<Coverage>;
}

/// Enforces a minimum interval between consecutive calls to [`wait`].
///
/// The first call never sleeps, so there is no delay before the first or
/// after the last request of a run.
///
/// [`wait`]: Throttle::wait
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichConfig {
    /// Minimum time between geocoder requests.
    pub delay: Duration,
    /// Process at most this many pending suburbs.
    pub limit: Option<usize>,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            limit: None,
        }
    }
}

/// Outcome of an enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichReport {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    /// Suburb ids that did not get a centroid, in processing order.
    pub failed_ids: Vec<String>,
    /// Centroid coverage after the pass.
    pub coverage: Coverage,
}

impl EnrichReport {
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        100.0 * self.successful as f64 / self.processed as f64
    }
}

/// Runs one enrichment pass.
///
/// A geocoder miss, a geocoder error or an empty reprojection fails only
/// that row: it is logged, counted and left untouched, and is not retried
/// in this run. Failing to read pending rows or to write a centroid is
/// fatal.
pub fn run_enrichment<S, G>(store: &mut S, geocoder: &mut G, config: &EnrichConfig) -> Result<EnrichReport>
where
    S: CentroidStore + ?Sized,
    G: Geocoder + ?Sized,
{
    let mut pending = store.pending()?;
    if let Some(limit) = config.limit {
        pending.truncate(limit);
    }

    let total = pending.len();
    info!(
        pending = total,
        "found {total} suburbs without centroids, estimated ~{} minutes",
        (total as f64 * config.delay.as_secs_f64() / 60.0) as u64
    );

    let mut throttle = Throttle::new(config.delay);
    let mut successful = 0;
    let mut failed_ids = Vec::new();

    for (i, suburb) in pending.iter().enumerate() {
        info!("[{}/{total}] {}, {}", i + 1, suburb.name, suburb.district_name);
        throttle.wait();

        let query = place_query(&suburb.name, &suburb.district_name);
        let point = match geocoder.locate(&query) {
            Ok(Some(point)) => point,
            Ok(None) => {
                warn!(suburb_id = %suburb.suburb_id, "not found by geocoder");
                failed_ids.push(suburb.suburb_id.clone());
                continue;
            }
            Err(e) => {
                warn!(suburb_id = %suburb.suburb_id, "error geocoding {}: {e}", suburb.name);
                failed_ids.push(suburb.suburb_id.clone());
                continue;
            }
        };
        info!("found: {:.6}, {:.6}", point.lat, point.lon);

        let wkt = match store.project(point) {
            Ok(Some(wkt)) => wkt,
            Ok(None) => {
                warn!(suburb_id = %suburb.suburb_id, "coordinate transformation returned nothing");
                failed_ids.push(suburb.suburb_id.clone());
                continue;
            }
            Err(e) => {
                warn!(suburb_id = %suburb.suburb_id, "coordinate transformation failed: {e}");
                failed_ids.push(suburb.suburb_id.clone());
                continue;
            }
        };

        store.set_centroid(&suburb.suburb_id, &wkt)?;
        successful += 1;
    }

    let coverage = store.coverage()?;
    let report = EnrichReport {
        processed: total,
        successful,
        failed: failed_ids.len(),
        failed_ids,
        coverage,
    };

    info!(
        processed = report.processed,
        successful = report.successful,
        failed = report.failed,
        "success rate {:.1}%",
        report.success_rate()
    );
    info!(
        with_centroid = coverage.filled,
        without_centroid = coverage.missing(),
        "final centroid status"
    );
    Ok(report)
}

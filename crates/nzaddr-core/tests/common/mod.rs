#![allow(dead_code)]

use nzaddr_core::common::Coverage;
use nzaddr_core::enrich::{CentroidStore, PendingSuburb};
use nzaddr_core::geocode::{GeoPoint, Geocoder};
use nzaddr_core::{EtlError, Result, SqlExecutor};
use std::collections::HashMap;

/// Records every script; optionally fails the n-th `BEGIN;` script (1-based).
#[derive(Default)]
pub struct RecordingExecutor {
    pub scripts: Vec<String>,
    pub fail_transaction: Option<usize>,
    pub committed_statements: usize,
    transactions: usize,
}

impl RecordingExecutor {
    pub fn failing_on(batch: usize) -> Self {
        Self {
            fail_transaction: Some(batch),
            ..Self::default()
        }
    }

    pub fn transactions(&self) -> Vec<&String> {
        self.scripts.iter().filter(|s| s.starts_with("BEGIN;")).collect()
    }
}

impl SqlExecutor for RecordingExecutor {
    fn run_script(&mut self, script: &str) -> Result<String> {
        self.scripts.push(script.to_string());

        if script.starts_with("BEGIN;") {
            self.transactions += 1;
            if self.fail_transaction == Some(self.transactions) {
                return Err(EtlError::Process("exit status: 3 (ERROR: invalid GeoJSON)".into()));
            }
            self.committed_statements += script
                .lines()
                .filter(|l| l.starts_with("UPDATE") || l.starts_with("INSERT"))
                .count();
            return Ok(String::new());
        }
        if script.starts_with("SELECT COUNT(*) AS total") {
            return Ok(format!("{}|{}\n", self.committed_statements + 2, self.committed_statements));
        }
        if script.starts_with("SELECT COUNT(*)") {
            return Ok(format!("{}\n", self.committed_statements));
        }
        Ok(String::new())
    }
}

/// In-memory suburbs table: id -> (name, district, centroid).
#[derive(Default)]
pub struct MemoryStore {
    pub suburbs: Vec<(String, String, String, Option<String>)>,
    /// Latitudes whose reprojection yields nothing.
    pub unprojectable_lats: Vec<f64>,
    pub writes: Vec<String>,
}

impl MemoryStore {
    pub fn with(rows: &[(&str, &str, &str, Option<&str>)]) -> Self {
        Self {
            suburbs: rows
                .iter()
                .map(|(id, name, district, c)| {
                    (
                        id.to_string(),
                        name.to_string(),
                        district.to_string(),
                        c.map(str::to_string),
                    )
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn centroid(&self, id: &str) -> Option<&str> {
        self.suburbs
            .iter()
            .find(|s| s.0 == id)
            .and_then(|s| s.3.as_deref())
    }
}

impl CentroidStore for MemoryStore {
    fn pending(&mut self) -> Result<Vec<PendingSuburb>> {
        let mut rows: Vec<PendingSuburb> = self
            .suburbs
            .iter()
            .filter(|s| s.3.is_none())
            .map(|s| PendingSuburb {
                suburb_id: s.0.clone(),
                name: s.1.clone(),
                district_name: s.2.clone(),
            })
            .collect();
        rows.sort_by(|a, b| (&a.district_name, &a.name).cmp(&(&b.district_name, &b.name)));
        Ok(rows)
    }

    fn project(&mut self, point: GeoPoint) -> Result<Option<String>> {
        if self.unprojectable_lats.contains(&point.lat) {
            return Ok(None);
        }
        Ok(Some(format!("POINT({} {})", point.lon, point.lat)))
    }

    fn set_centroid(&mut self, suburb_id: &str, wkt: &str) -> Result<()> {
        self.writes.push(suburb_id.to_string());
        let row = self
            .suburbs
            .iter_mut()
            .find(|s| s.0 == suburb_id)
            .ok_or_else(|| EtlError::NotFound(suburb_id.to_string()))?;
        row.3 = Some(wkt.to_string());
        Ok(())
    }

    fn coverage(&mut self) -> Result<Coverage> {
        Ok(Coverage {
            total: self.suburbs.len() as u64,
            filled: self.suburbs.iter().filter(|s| s.3.is_some()).count() as u64,
        })
    }
}

/// Answers from a fixed table; unknown queries miss, `"boom"` queries error.
#[derive(Default)]
pub struct TableGeocoder {
    pub answers: HashMap<String, GeoPoint>,
    pub queries: Vec<String>,
}

impl TableGeocoder {
    pub fn with(entries: &[(&str, f64, f64)]) -> Self {
        Self {
            answers: entries
                .iter()
                .map(|(q, lat, lon)| (q.to_string(), GeoPoint { lat: *lat, lon: *lon }))
                .collect(),
            queries: Vec::new(),
        }
    }
}

impl Geocoder for TableGeocoder {
    fn locate(&mut self, query: &str) -> Result<Option<GeoPoint>> {
        self.queries.push(query.to_string());
        if query.contains("boom") {
            return Err(EtlError::InvalidData("connection reset".into()));
        }
        Ok(self.answers.get(query).copied())
    }
}

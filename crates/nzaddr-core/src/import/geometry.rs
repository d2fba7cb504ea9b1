// crates/nzaddr-core/src/import/geometry.rs
use crate::common::Coverage;
use crate::config::DbLayout;
use crate::error::{EtlError, Result};
use crate::model::suburb_code;
use crate::sql::{self, SqlExecutor};
use geojson::{Feature, FeatureCollection};
use serde_json::Value;
use tracing::{error, info};

/// Suburbs per transaction when importing polygons.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// One `UPDATE ... SET geom` prepared from a GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryUpdate {
    pub suburb_id: String,
    /// The feature's geometry, serialized back to GeoJSON text.
    pub geometry_json: String,
}

impl GeometryUpdate {
    /// Reads `properties.suburb_id` and the geometry of a feature.
    ///
    /// A string id is used verbatim; a numeric id is a source suburb id and
    /// is rendered as its `S{:05}` code.
    pub fn from_feature(feature: &Feature) -> Result<Self> {
        let suburb_id = match feature.property("suburb_id") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => {
                let id = n
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| EtlError::InvalidData(format!("bad suburb_id {n}")))?;
                suburb_code(id)
            }
            Some(other) => {
                return Err(EtlError::InvalidData(format!("bad suburb_id {other}")));
            }
            None => return Err(EtlError::InvalidData("feature without suburb_id".into())),
        };

        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            EtlError::InvalidData(format!("feature {suburb_id} has no geometry"))
        })?;

        Ok(Self {
            suburb_id,
            geometry_json: serde_json::to_string(geometry)?,
        })
    }
}

/// Prepares every feature up front so malformed input fails before any
/// batch touches the database.
pub fn updates_from_collection(collection: &FeatureCollection) -> Result<Vec<GeometryUpdate>> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, f)| {
            GeometryUpdate::from_feature(f).map_err(|e| match e {
                EtlError::InvalidData(msg) => EtlError::InvalidData(format!("feature {i}: {msg}")),
                other => other,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batching {
    /// Fixed-size windows, one transaction each.
    Fixed(usize),
    /// Everything in a single transaction.
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    pub batching: Batching,
    /// Run `ALTER TABLE ... ADD COLUMN IF NOT EXISTS geom` first.
    pub ensure_column: bool,
    /// Create the GiST index and `ANALYZE` after the last batch.
    pub create_index: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batching: Batching::Fixed(DEFAULT_BATCH_SIZE),
            ensure_column: false,
            create_index: true,
        }
    }
}

/// Outcome of a completed geometry import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryImport {
    pub updated: usize,
    pub batches: usize,
    pub coverage: Coverage,
}

/// Imports suburb polygons in batches.
///
/// Each batch is its own `BEGIN; ... COMMIT;`. There is no transaction
/// around the batches: when batch `k` fails, batches `1..k` stay committed,
/// nothing after `k` is issued and the error reports how many updates made
/// it. The updates are keyed by suburb id, so re-running the whole import
/// after a failure is safe.
pub fn import_geometries<E: SqlExecutor>(
    executor: &mut E,
    layout: &DbLayout,
    updates: &[GeometryUpdate],
    config: &ImportConfig,
) -> Result<GeometryImport> {
    let batch_size = match config.batching {
        Batching::Fixed(0) => {
            return Err(EtlError::InvalidData("batch size must be at least 1".into()))
        }
        Batching::Fixed(n) => n,
        Batching::Single => updates.len().max(1),
    };
    let total = updates.len();
    info!(suburbs = total, batch_size, "importing suburb geometries");

    if config.ensure_column {
        executor.run_script(&sql::ensure_geom_column(layout))?;
    }

    let mut committed = 0;
    let mut batches = 0;
    for (idx, chunk) in updates.chunks(batch_size).enumerate() {
        let statements: Vec<String> = chunk
            .iter()
            .map(|u| sql::geometry_update(layout, &u.suburb_id, &u.geometry_json))
            .collect();

        if let Err(e) = executor.run_script(&sql::transaction(&statements)) {
            error!(batch = idx + 1, start = committed, "batch failed: {e}");
            return Err(EtlError::BatchFailed {
                batch: idx + 1,
                committed,
                source: Box::new(e),
            });
        }

        committed += chunk.len();
        batches += 1;
        info!("processed {committed}/{total} suburbs");
    }

    if config.create_index {
        info!("creating spatial index");
        executor.run_script(&sql::spatial_index_script(layout))?;
    }

    let coverage = parse_coverage(&executor.run_script(&sql::coverage_query(layout, "geom"))?)?;
    info!(
        total = coverage.total,
        with_geom = coverage.filled,
        "geometry coverage {:.1}%",
        coverage.percent()
    );

    Ok(GeometryImport {
        updated: committed,
        batches,
        coverage,
    })
}

/// Reads a `total | filled` row from script output.
pub(crate) fn parse_coverage(output: &str) -> Result<Coverage> {
    output
        .lines()
        .find_map(|line| {
            let mut fields = line.split('|').map(str::trim);
            let total = fields.next()?.parse().ok()?;
            let filled = fields.next()?.parse().ok()?;
            Some(Coverage { total, filled })
        })
        .ok_or_else(|| EtlError::InvalidData(format!("no coverage row in output: {output:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(props: serde_json::Value, with_geometry: bool) -> Feature {
        let geometry = with_geometry.then(|| {
            geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![174.74, -36.85],
                vec![174.75, -36.85],
                vec![174.75, -36.86],
                vec![174.74, -36.85],
            ]]))
        });
        Feature {
            bbox: None,
            geometry,
            id: None,
            properties: props.as_object().cloned(),
            foreign_members: None,
        }
    }

    #[test]
    fn reads_string_and_numeric_suburb_ids() {
        let u = GeometryUpdate::from_feature(&feature(json!({"suburb_id": "S00010"}), true)).unwrap();
        assert_eq!(u.suburb_id, "S00010");
        assert!(u.geometry_json.contains("\"Polygon\""));

        let u = GeometryUpdate::from_feature(&feature(json!({"suburb_id": 42}), true)).unwrap();
        assert_eq!(u.suburb_id, "S00042");
    }

    #[test]
    fn rejects_features_without_id_or_geometry() {
        assert!(GeometryUpdate::from_feature(&feature(json!({"name": "x"}), true)).is_err());
        assert!(GeometryUpdate::from_feature(&feature(json!({"suburb_id": ""}), true)).is_err());
        assert!(GeometryUpdate::from_feature(&feature(json!({"suburb_id": "S1"}), false)).is_err());
    }

    #[test]
    fn collection_errors_name_the_feature() {
        let collection = FeatureCollection {
            bbox: None,
            features: vec![
                feature(json!({"suburb_id": "S00001"}), true),
                feature(json!({}), true),
            ],
            foreign_members: None,
        };
        let err = updates_from_collection(&collection).unwrap_err();
        assert!(err.to_string().contains("feature 1"), "{err}");
    }

    #[test]
    fn parses_coverage_rows() {
        assert_eq!(
            parse_coverage("10|8\n").unwrap(),
            Coverage {
                total: 10,
                filled: 8
            }
        );
        let psql = " total | filled \n-------+--------\n    10 |      8\n(1 row)\n";
        assert_eq!(parse_coverage(psql).unwrap().filled, 8);
        assert!(parse_coverage("").is_err());
    }
}

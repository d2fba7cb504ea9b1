// crates/nzaddr-core/src/enrich/pg.rs
use super::{CentroidStore, PendingSuburb};
use crate::common::Coverage;
use crate::config::{DbLayout, WGS84_SRID};
use crate::error::Result;
use crate::geocode::GeoPoint;
use postgres::Client;

/// [`CentroidStore`] over a direct PostgreSQL/PostGIS connection.
///
/// Every write autocommits, so an interrupted pass keeps what it did.
pub struct PgCentroidStore {
    client: Client,
    layout: DbLayout,
}

impl PgCentroidStore {
    pub fn new(client: Client, layout: DbLayout) -> Self {
        Self { client, layout }
    }

    pub fn into_inner(self) -> Client {
        self.client
    }
}

impl CentroidStore for PgCentroidStore {
    fn pending(&mut self) -> Result<Vec<PendingSuburb>> {
        let sql = format!(
            "SELECT s.suburb_id, s.name, d.name AS district_name \
             FROM {} s JOIN {} d ON s.district_id = d.district_id \
             WHERE s.centroid IS NULL \
             ORDER BY d.name, s.name",
            self.layout.table("suburbs"),
            self.layout.table("districts"),
        );
        let rows = self.client.query(sql.as_str(), &[])?;
        Ok(rows
            .iter()
            .map(|row| PendingSuburb {
                suburb_id: row.get(0),
                name: row.get(1),
                district_name: row.get(2),
            })
            .collect())
    }

    fn project(&mut self, point: GeoPoint) -> Result<Option<String>> {
        // ST_MakePoint takes (x, y) = (lon, lat).
        let row = self.client.query_opt(
            "SELECT ST_AsText(ST_Transform(ST_SetSRID(ST_MakePoint($1, $2), $3), $4))",
            &[&point.lon, &point.lat, &WGS84_SRID, &self.layout.centroid_srid],
        )?;
        Ok(row.and_then(|r| r.get::<_, Option<String>>(0)))
    }

    fn set_centroid(&mut self, suburb_id: &str, wkt: &str) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET centroid = ST_GeomFromText($1, $2) WHERE suburb_id = $3",
            self.layout.table("suburbs")
        );
        self.client
            .execute(sql.as_str(), &[&wkt, &self.layout.centroid_srid, &suburb_id])?;
        Ok(())
    }

    fn coverage(&mut self) -> Result<Coverage> {
        let sql = format!(
            "SELECT COUNT(*), COUNT(centroid) FROM {}",
            self.layout.table("suburbs")
        );
        let row = self.client.query_one(sql.as_str(), &[])?;
        let total: i64 = row.get(0);
        let filled: i64 = row.get(1);
        Ok(Coverage {
            total: total as u64,
            filled: filled as u64,
        })
    }
}

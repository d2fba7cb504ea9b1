// crates/nzaddr-core/src/sql/mod.rs

//! # SQL
//!
//! Statement builders for the hierarchy tables and the [`SqlExecutor`]
//! seam that runs them, either over a direct connection or through a
//! `psql` process.
//!
//! Scripts are plain text because the `psql` executor can only take text on
//! stdin, so every value is rendered as an escaped SQL literal.

use crate::config::DbLayout;
use crate::table::Table;

mod executor;
pub mod psql;

pub use executor::SqlExecutor;
#[cfg(feature = "pg")]
pub use executor::connect;
pub use psql::PsqlCommand;

/// Renders `value` as a single-quoted SQL string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `INSERT INTO <schema>.<table> (...) VALUES (...);` for one CSV row.
///
/// All values are string literals; PostgreSQL coerces untyped literals to
/// the column types (`'true'` into a boolean column, for instance).
pub fn insert_statement(layout: &DbLayout, table: Table, values: &[String]) -> String {
    let columns = table.columns().join(", ");
    let values = values
        .iter()
        .map(|v| quote_literal(v))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({columns}) VALUES ({values});",
        layout.table(table.name())
    )
}

/// Sets one suburb's polygon from a GeoJSON geometry.
///
/// `ST_Multi` lets plain `Polygon` features land in the `MultiPolygon`
/// column.
pub fn geometry_update(layout: &DbLayout, suburb_id: &str, geometry_json: &str) -> String {
    format!(
        "UPDATE {} SET geom = ST_Multi(ST_SetSRID(ST_GeomFromGeoJSON({}), {})) WHERE suburb_id = {};",
        layout.table("suburbs"),
        quote_literal(geometry_json),
        layout.geom_srid,
        quote_literal(suburb_id),
    )
}

/// Adds `suburbs.geom` if it does not exist yet.
pub fn ensure_geom_column(layout: &DbLayout) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN IF NOT EXISTS geom geometry(MultiPolygon, {});",
        layout.table("suburbs"),
        layout.geom_srid
    )
}

/// Wraps statements in one explicit transaction.
pub fn transaction<S: AsRef<str>>(statements: &[S]) -> String {
    let mut sql = String::from("BEGIN;\n");
    for stmt in statements {
        sql.push_str(stmt.as_ref());
        sql.push('\n');
    }
    sql.push_str("COMMIT;\n");
    sql
}

/// GiST index on `suburbs.geom` followed by `ANALYZE`.
pub fn spatial_index_script(layout: &DbLayout) -> String {
    let suburbs = layout.table("suburbs");
    format!(
        "CREATE INDEX IF NOT EXISTS idx_suburbs_geom ON {suburbs} USING GIST(geom);\nANALYZE {suburbs};\n"
    )
}

/// `SELECT total, filled` for a nullable column of `suburbs`.
///
/// `column` is one of our own column names, never user input.
pub fn coverage_query(layout: &DbLayout, column: &str) -> String {
    format!(
        "SELECT COUNT(*) AS total, COUNT({column}) AS filled FROM {};",
        layout.table("suburbs")
    )
}

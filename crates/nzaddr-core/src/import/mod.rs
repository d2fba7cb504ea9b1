// crates/nzaddr-core/src/import/mod.rs

//! # Database Import
//!
//! Pushes prepared data into the hierarchy tables:
//! - [`load_table`]: CSV rows as `INSERT`s in one transaction.
//! - [`geometry`]: suburb polygons from GeoJSON, in fixed-size batches.

use crate::config::DbLayout;
use crate::error::{EtlError, Result};
use crate::sql::{self, SqlExecutor};
use crate::table::Table;
use tracing::info;

pub mod geometry;

pub use geometry::{import_geometries, GeometryImport, GeometryUpdate, ImportConfig};

/// Inserts `rows` (raw values in `table`'s column order) in one
/// transaction and returns the table's row count afterwards.
///
/// Plain `INSERT`: re-loading rows that already exist fails on the primary
/// key and nothing from this call is committed.
pub fn load_table<E: SqlExecutor>(
    executor: &mut E,
    layout: &DbLayout,
    table: Table,
    rows: &[Vec<String>],
) -> Result<u64> {
    let width = table.columns().len();
    if let Some((line, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(EtlError::InvalidData(format!(
            "{table} row {} has {} values, expected {width}",
            line + 1,
            row.len()
        )));
    }

    let statements: Vec<String> = rows
        .iter()
        .map(|row| sql::insert_statement(layout, table, row))
        .collect();
    executor.run_script(&sql::transaction(&statements))?;

    let count_sql = format!("SELECT COUNT(*) FROM {};", layout.table(table.name()));
    let output = executor.run_script(&count_sql)?;
    let count = parse_count(&output)?;
    info!(table = %table, inserted = rows.len(), total = count, "loaded {} {table}", rows.len());
    Ok(count)
}

/// First integer line of a script's output (psql prints headers and
/// footers around it, the direct driver prints it alone).
pub(crate) fn parse_count(output: &str) -> Result<u64> {
    output
        .lines()
        .find_map(|line| line.trim().parse::<u64>().ok())
        .ok_or_else(|| EtlError::InvalidData(format!("no row count in output: {output:?}")))
}

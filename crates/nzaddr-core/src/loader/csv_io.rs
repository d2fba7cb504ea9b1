// crates/nzaddr-core/src/loader/csv_io.rs
use crate::common::HierarchyStats;
use crate::error::{EtlError, Result};
use crate::model::{Hierarchy, RegionRow};
use crate::table::Table;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes `rows` as CSV with `table`'s header, even when `rows` is empty.
///
/// Quoting follows RFC 4180: only fields containing the delimiter, a quote
/// or a line break are quoted.
pub fn write_rows<W: Write, T: Serialize>(writer: W, table: Table, rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `districts.csv` and `suburbs.csv` for a flattened hierarchy.
pub fn write_hierarchy(
    hierarchy: &Hierarchy,
    districts_path: &Path,
    suburbs_path: &Path,
) -> Result<HierarchyStats> {
    write_rows(File::create(districts_path)?, Table::Districts, &hierarchy.districts)?;
    write_rows(File::create(suburbs_path)?, Table::Suburbs, &hierarchy.suburbs)?;

    let stats = hierarchy.stats();
    info!(
        districts = stats.districts,
        suburbs = stats.suburbs,
        "extracted {} districts and {} suburbs",
        stats.districts,
        stats.suburbs
    );
    Ok(stats)
}

/// Writes `regions.csv`.
pub fn write_regions(regions: &[RegionRow], path: &Path) -> Result<()> {
    write_rows(File::create(path)?, Table::Regions, regions)?;
    info!(regions = regions.len(), "created {} regions", regions.len());
    Ok(())
}

/// Reads a hierarchy CSV into rows of raw field values in `table`'s column
/// order.
///
/// Columns are matched by header name, so column order in the file does not
/// matter and extra columns are ignored. A missing column is fatal.
pub fn read_table_csv(path: &Path, table: Table) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).map_err(|e| {
        EtlError::NotFound(format!("CSV not found at {}: {}", path.display(), e))
    })?;
    read_table(file, table)
}

pub(crate) fn read_table<R: std::io::Read>(reader: R, table: Table) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let positions = table
        .columns()
        .iter()
        .map(|col| {
            headers.iter().position(|h| h.trim() == *col).ok_or_else(|| {
                EtlError::InvalidData(format!("{table} CSV is missing column '{col}'"))
            })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row = positions
            .iter()
            .map(|&i| record.get(i).unwrap_or_default().to_string())
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

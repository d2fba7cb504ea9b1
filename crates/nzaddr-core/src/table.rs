// crates/nzaddr-core/src/table.rs
use std::fmt;
use std::str::FromStr;

/// The three hierarchy tables, with their fixed column order.
///
/// The same order is used for CSV headers and for `INSERT` column lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Regions,
    Districts,
    Suburbs,
}

pub const REGION_COLUMNS: &[&str] = &["region_id", "name"];
pub const DISTRICT_COLUMNS: &[&str] = &["district_id", "region_id", "name", "display_name"];
pub const SUBURB_COLUMNS: &[&str] = &[
    "suburb_id",
    "district_id",
    "name",
    "is_major_suburb",
    "population_category",
];

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Regions => "regions",
            Table::Districts => "districts",
            Table::Suburbs => "suburbs",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Regions => REGION_COLUMNS,
            Table::Districts => DISTRICT_COLUMNS,
            Table::Suburbs => SUBURB_COLUMNS,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regions" => Ok(Table::Regions),
            "districts" => Ok(Table::Districts),
            "suburbs" => Ok(Table::Suburbs),
            other => Err(format!(
                "unknown table '{other}' (expected regions, districts or suburbs)"
            )),
        }
    }
}

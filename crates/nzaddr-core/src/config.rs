// crates/nzaddr-core/src/config.rs

/// Schema holding the `regions`, `districts` and `suburbs` tables.
pub const DEFAULT_SCHEMA: &str = "nz_addresses";

/// WGS84, the SRID of imported suburb polygons and geocoder output.
pub const WGS84_SRID: i32 = 4326;

/// NZTM2000, the projected SRID of suburb centroids.
pub const NZTM2000_SRID: i32 = 2193;

/// Where things live in the target database.
///
/// The defaults match the `nz_addresses` schema the hierarchy was designed
/// for; override them to load into a scratch schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbLayout {
    pub schema: String,
    /// SRID of `suburbs.geom`.
    pub geom_srid: i32,
    /// SRID of `suburbs.centroid`.
    pub centroid_srid: i32,
}

impl Default for DbLayout {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            geom_srid: WGS84_SRID,
            centroid_srid: NZTM2000_SRID,
        }
    }
}

impl DbLayout {
    /// Schema-qualified table name, e.g. `nz_addresses.suburbs`.
    pub fn table(&self, name: &str) -> String {
        format!("{}.{}", self.schema, name)
    }
}

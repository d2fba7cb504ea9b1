use clap::{Args, Parser, Subcommand};
use nzaddr_core::config::DEFAULT_SCHEMA;
use nzaddr_core::import::geometry::DEFAULT_BATCH_SIZE;
use nzaddr_core::Table;
use std::path::PathBuf;

/// CLI arguments for nzaddr
#[derive(Debug, Parser)]
#[command(
    name = "nzaddr",
    version,
    about = "ETL for the NZ address hierarchy: localities, suburb polygons and centroids"
)]
pub struct CliArgs {
    /// Schema holding the regions/districts/suburbs tables
    #[arg(long, global = true, env = "NZADDR_SCHEMA", default_value = DEFAULT_SCHEMA)]
    pub schema: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach the database. `--container` wins over `--database-url`.
#[derive(Debug, Args)]
pub struct DbArgs {
    /// PostgreSQL connection string for a direct connection
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Pipe SQL into `docker exec -i <CONTAINER> psql` instead
    #[arg(long, env = "PSQL_CONTAINER")]
    pub container: Option<String>,

    /// psql user inside the container
    #[arg(long, env = "PSQL_USER", default_value = "nzuser")]
    pub db_user: String,

    /// psql database inside the container
    #[arg(long, env = "PSQL_DB", default_value = "nz_addresses_db")]
    pub db_name: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a regions CSV (region_id,name) from the localities JSON
    ExtractRegions {
        /// TradeMe localities JSON (optionally .gz)
        #[arg(short = 'i', long = "input", required_unless_present = "registry")]
        input: Option<PathBuf>,

        /// Write the fixed region registry used by `flatten` instead
        #[arg(long, conflicts_with = "input")]
        registry: bool,

        #[arg(short = 'o', long = "output", default_value = "regions_from_trademe.csv")]
        output: PathBuf,
    },

    /// Flatten the localities JSON into districts.csv and suburbs.csv
    Flatten {
        /// TradeMe localities JSON (optionally .gz)
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        #[arg(long, default_value = "districts.csv")]
        districts: PathBuf,

        #[arg(long, default_value = "suburbs.csv")]
        suburbs: PathBuf,

        /// Fail on any region name missing from the registry instead of skipping it
        #[arg(long)]
        strict_regions: bool,
    },

    /// Insert a regions/districts/suburbs CSV into its table
    LoadCsv {
        /// Target table: regions, districts or suburbs
        #[arg(short = 't', long)]
        table: Table,

        #[arg(short = 'c', long)]
        csv: PathBuf,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Import suburb polygons from a GeoJSON FeatureCollection
    ImportGeoms {
        /// GeoJSON with a `suburb_id` property per feature
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Suburbs per transaction
        #[arg(short = 'b', long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// One transaction for the whole file
        #[arg(long, conflicts_with = "batch_size")]
        single: bool,

        /// Add the geom column first if it is missing
        #[arg(long)]
        ensure_column: bool,

        /// Skip creating the spatial index afterwards
        #[arg(long)]
        no_index: bool,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Geocode suburbs without a centroid through Nominatim
    #[cfg(all(feature = "pg", feature = "geocode"))]
    FetchCentroids {
        /// PostgreSQL connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Minimum milliseconds between geocoder requests
        #[arg(long, default_value_t = nzaddr_core::enrich::DEFAULT_DELAY.as_millis() as u64)]
        delay_ms: u64,

        /// Stop after this many suburbs
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, env = "NOMINATIM_URL", default_value = nzaddr_core::geocode::nominatim::NOMINATIM_URL)]
        nominatim_url: String,
    },
}

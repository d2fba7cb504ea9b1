//! nzaddr: command-line front end for `nzaddr-core`
//!
//! Each subcommand is one step of the NZ address hierarchy load:
//!
//! - Derive the regions CSV from the TradeMe localities JSON, or dump the
//!   fixed registry that `flatten` resolves region names against
//!   $ nzaddr extract-regions -i trademe_localities.json
//!   $ nzaddr extract-regions --registry -o regions.csv
//!
//! - Flatten localities into districts.csv and suburbs.csv
//!   $ nzaddr flatten -i trademe_localities.json
//!
//! - Insert a CSV into its table, directly or through a psql container
//!   $ nzaddr load-csv --table suburbs --csv suburbs.csv --database-url postgres://...
//!   $ nzaddr load-csv --table suburbs --csv suburbs.csv --container nz-addresses-db
//!
//! - Import suburb polygons in batches of 100
//!   $ nzaddr import-geoms -i suburbs_with_geoms.geojson --container nz-addresses-db
//!
//! - Fill missing centroids through Nominatim
//!   $ nzaddr fetch-centroids --database-url postgres://...
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).
mod args;

use crate::args::{CliArgs, Commands, DbArgs};
use anyhow::Context;
use clap::Parser;
use nzaddr_core::import::geometry::{updates_from_collection, Batching};
use nzaddr_core::import::{import_geometries, load_table, ImportConfig};
use nzaddr_core::loader::{read_feature_collection, read_localities, read_table_csv};
use nzaddr_core::loader::{write_hierarchy, write_regions};
use nzaddr_core::model::regions::{extract_regions, registry_rows};
use nzaddr_core::{flatten, DbLayout, PsqlCommand, RegionPolicy, SqlExecutor, SuburbClassification};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    let args = CliArgs::parse();

    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let layout = DbLayout {
        schema: args.schema,
        ..DbLayout::default()
    };

    match args.command {
        Commands::ExtractRegions {
            input,
            registry,
            output,
        } => {
            let regions = match input {
                Some(input) if !registry => {
                    let localities = read_localities(&input)
                        .with_context(|| format!("reading {}", input.display()))?;
                    extract_regions(&localities)
                }
                _ => registry_rows(),
            };
            write_regions(&regions, &output)?;
            info!(regions = regions.len(), output = %output.display(), "wrote regions");
        }

        Commands::Flatten {
            input,
            districts,
            suburbs,
            strict_regions,
        } => {
            let localities = read_localities(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let policy = if strict_regions {
                RegionPolicy::Strict
            } else {
                RegionPolicy::Skip
            };
            let hierarchy = flatten(&localities, policy, SuburbClassification::default())?;
            if !hierarchy.skipped_regions.is_empty() {
                warn!(regions = ?hierarchy.skipped_regions, "skipped regions not in the registry");
            }
            let stats = write_hierarchy(&hierarchy, &districts, &suburbs)?;
            println!("SUCCESS: {} districts, {} suburbs", stats.districts, stats.suburbs);
        }

        Commands::LoadCsv { table, csv, db } => {
            let rows = read_table_csv(&csv, table)
                .with_context(|| format!("reading {}", csv.display()))?;
            let mut executor = open_executor(&db)?;
            let count = load_table(&mut executor, &layout, table, &rows)
                .with_context(|| format!("loading {table}"))?;
            println!("SUCCESS: {table} now holds {count} rows");
        }

        Commands::ImportGeoms {
            input,
            batch_size,
            single,
            ensure_column,
            no_index,
            db,
        } => {
            let collection = read_feature_collection(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let updates = updates_from_collection(&collection)?;
            info!(features = updates.len(), "parsed suburb geometries");

            let config = ImportConfig {
                batching: if single {
                    Batching::Single
                } else {
                    Batching::Fixed(batch_size)
                },
                ensure_column,
                create_index: !no_index,
            };
            let mut executor = open_executor(&db)?;
            let result = import_geometries(&mut executor, &layout, &updates, &config)?;
            println!(
                "SUCCESS: {} suburbs updated in {} batches, {}/{} with geometry",
                result.updated, result.batches, result.coverage.filled, result.coverage.total
            );
        }

        #[cfg(all(feature = "pg", feature = "geocode"))]
        Commands::FetchCentroids {
            database_url,
            delay_ms,
            limit,
            nominatim_url,
        } => {
            use nzaddr_core::enrich::{run_enrichment, EnrichConfig, PgCentroidStore};
            use nzaddr_core::geocode::{NominatimClient, NominatimConfig};

            let client = nzaddr_core::sql::connect(&database_url).context("connecting to database")?;
            let mut store = PgCentroidStore::new(client, layout);
            let mut geocoder = NominatimClient::new(NominatimConfig {
                base_url: nominatim_url,
                ..NominatimConfig::default()
            })?;
            let config = EnrichConfig {
                delay: std::time::Duration::from_millis(delay_ms),
                limit,
            };

            let report = run_enrichment(&mut store, &mut geocoder, &config)?;
            if !report.failed_ids.is_empty() {
                warn!(suburbs = ?report.failed_ids, "no centroid found");
            }
            println!(
                "SUCCESS: {}/{} centroids found, {}/{} suburbs now have one",
                report.successful, report.processed, report.coverage.filled, report.coverage.total
            );
        }
    }
    Ok(())
}

/// `--container` selects the psql pipe; otherwise a direct connection.
fn open_executor(db: &DbArgs) -> anyhow::Result<Box<dyn SqlExecutor>> {
    if let Some(container) = &db.container {
        let psql = PsqlCommand::docker(container, &db.db_user, &db.db_name);
        info!(command = %psql.command_line(), "running SQL through psql");
        return Ok(Box::new(psql));
    }

    #[cfg(feature = "pg")]
    if let Some(url) = &db.database_url {
        let client = nzaddr_core::sql::connect(url).context("connecting to database")?;
        return Ok(Box::new(client));
    }

    anyhow::bail!("no database configured: pass --database-url or --container")
}

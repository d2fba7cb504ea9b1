// crates/nzaddr-core/src/model/convert.rs
use super::flat::{
    district_code, suburb_code, DistrictRow, Hierarchy, SuburbClassification, SuburbRow,
};
use super::raw::LocalityRaw;
use super::regions::{region_id, unknown_regions, RegionPolicy, AGGREGATE_LOCALITY};
use crate::error::{EtlError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// **Hierarchy Flattener:** Localities tree -> district and suburb rows.
///
/// Walks regions, districts and suburbs in source order. The `All`
/// aggregate is skipped. A region missing from the registry is either
/// skipped with a warning or rejects the whole input, depending on
/// `policy`. Every suburb is stamped with `classification`.
///
/// Fails on ids that collide after formatting; the rest is infallible and
/// deterministic.
pub fn flatten(
    localities: &[LocalityRaw],
    policy: RegionPolicy,
    classification: SuburbClassification,
) -> Result<Hierarchy> {
    if policy == RegionPolicy::Strict {
        let unknown = unknown_regions(localities);
        if !unknown.is_empty() {
            return Err(EtlError::UnknownRegions(unknown));
        }
    }

    let mut hierarchy = Hierarchy::default();
    let mut seen_districts = HashSet::new();
    let mut seen_suburbs = HashSet::new();

    for locality in localities {
        if locality.name == AGGREGATE_LOCALITY {
            continue;
        }

        let Some(region_id) = region_id(&locality.name) else {
            warn!(region = %locality.name, "unknown region, skipping its districts and suburbs");
            hierarchy.skipped_regions.push(locality.name.clone());
            continue;
        };

        for d_raw in locality.districts() {
            let district_id = district_code(d_raw.district_id);
            if !seen_districts.insert(district_id.clone()) {
                return Err(EtlError::DuplicateId {
                    kind: "district",
                    id: district_id,
                });
            }

            for s_raw in d_raw.suburbs() {
                let suburb_id = suburb_code(s_raw.suburb_id);
                if !seen_suburbs.insert(suburb_id.clone()) {
                    return Err(EtlError::DuplicateId {
                        kind: "suburb",
                        id: suburb_id,
                    });
                }

                hierarchy.suburbs.push(SuburbRow {
                    suburb_id,
                    district_id: district_id.clone(),
                    name: s_raw.name.clone(),
                    is_major_suburb: classification.is_major_suburb,
                    population_category: classification.population_category,
                });
            }

            hierarchy.districts.push(DistrictRow {
                district_id,
                region_id: region_id.to_string(),
                name: d_raw.name.clone(),
                display_name: d_raw.name.clone(),
            });
        }

        debug!(region = %locality.name, region_id, "region flattened");
    }

    Ok(hierarchy)
}

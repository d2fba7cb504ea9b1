use nzaddr_core::loader::{read_localities, read_table_csv, write_hierarchy, write_regions};
use nzaddr_core::model::regions::extract_regions;
use nzaddr_core::model::{DistrictRaw, LocalityRaw, SuburbRaw};
use nzaddr_core::{
    flatten, EtlError, PopulationCategory, RegionPolicy, SuburbClassification, Table,
};
use std::collections::HashSet;
use std::path::Path;

fn fixture() -> Vec<LocalityRaw> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/localities.json");
    read_localities(path).expect("fixture should parse")
}

fn suburb(id: u32, name: &str) -> SuburbRaw {
    SuburbRaw {
        suburb_id: id,
        name: name.to_string(),
    }
}

fn district(id: u32, name: &str, suburbs: Option<Vec<SuburbRaw>>) -> DistrictRaw {
    DistrictRaw {
        district_id: id,
        name: name.to_string(),
        suburbs,
    }
}

fn region(name: &str, districts: Option<Vec<DistrictRaw>>) -> LocalityRaw {
    LocalityRaw {
        name: name.to_string(),
        districts,
    }
}

#[test]
fn single_region_district_suburb() {
    let tree = vec![region(
        "Auckland",
        Some(vec![district(5, "Central", Some(vec![suburb(10, "Ponsonby")]))]),
    )];

    let h = flatten(&tree, RegionPolicy::Skip, SuburbClassification::trademe()).unwrap();

    assert_eq!(h.districts.len(), 1);
    let d = &h.districts[0];
    assert_eq!(d.district_id, "D0005");
    assert_eq!(d.region_id, "R02");
    assert_eq!(d.name, "Central");
    assert_eq!(d.display_name, "Central");

    assert_eq!(h.suburbs.len(), 1);
    let s = &h.suburbs[0];
    assert_eq!(s.suburb_id, "S00010");
    assert_eq!(s.district_id, "D0005");
    assert_eq!(s.name, "Ponsonby");
    assert!(s.is_major_suburb);
    assert_eq!(s.population_category, PopulationCategory::High);
    assert!(h.skipped_regions.is_empty());
}

#[test]
fn counts_match_objects_under_known_regions() {
    let h = flatten(&fixture(), RegionPolicy::Skip, SuburbClassification::default()).unwrap();

    // Auckland: 2 districts / 2 suburbs, Hawke's Bay: 1 / 1, Gisborne: none.
    let stats = h.stats();
    assert_eq!(stats.districts, 3);
    assert_eq!(stats.suburbs, 3);

    let ids: Vec<&str> = h.districts.iter().map(|d| d.district_id.as_str()).collect();
    assert_eq!(ids, ["D0007", "D0008", "D0031"]);
    let ids: Vec<&str> = h.suburbs.iter().map(|s| s.suburb_id.as_str()).collect();
    assert_eq!(ids, ["S00042", "S00043", "S03101"]);
}

#[test]
fn aggregate_region_never_contributes() {
    let h = flatten(&fixture(), RegionPolicy::Skip, SuburbClassification::default()).unwrap();

    assert!(h.districts.iter().all(|d| d.name != "Everywhere"));
    assert!(h.suburbs.iter().all(|s| s.suburb_id != "S99999"));
    assert!(!h.skipped_regions.iter().any(|r| r == "All"));
}

#[test]
fn unknown_region_is_skipped_and_reported() {
    let h = flatten(&fixture(), RegionPolicy::Skip, SuburbClassification::default()).unwrap();

    assert_eq!(h.skipped_regions, ["Chatham Islands"]);
    assert!(h.districts.iter().all(|d| d.district_id != "D0090"));
    assert!(h.suburbs.iter().all(|s| s.district_id != "D0090"));
    // Regions after the unknown one are still processed.
    assert!(h.districts.iter().any(|d| d.region_id == "R06"));
}

#[test]
fn strict_policy_rejects_unknown_regions_up_front() {
    let err = flatten(&fixture(), RegionPolicy::Strict, SuburbClassification::default())
        .unwrap_err();
    match err {
        EtlError::UnknownRegions(names) => assert_eq!(names, ["Chatham Islands"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn ids_are_unique_and_well_formed() {
    let h = flatten(&fixture(), RegionPolicy::Skip, SuburbClassification::default()).unwrap();

    let districts: HashSet<&str> = h.districts.iter().map(|d| d.district_id.as_str()).collect();
    assert_eq!(districts.len(), h.districts.len());
    for id in &districts {
        assert!(id.starts_with('D') && id.len() == 5, "{id}");
    }

    let suburbs: HashSet<&str> = h.suburbs.iter().map(|s| s.suburb_id.as_str()).collect();
    assert_eq!(suburbs.len(), h.suburbs.len());
    for id in &suburbs {
        assert!(id.starts_with('S') && id.len() == 6, "{id}");
    }

    // Every suburb points at an emitted district.
    assert!(h.suburbs.iter().all(|s| districts.contains(s.district_id.as_str())));
}

#[test]
fn duplicate_suburb_id_is_fatal() {
    let tree = vec![region(
        "Otago",
        Some(vec![
            district(1, "Dunedin", Some(vec![suburb(5, "Mornington")])),
            district(2, "Queenstown", Some(vec![suburb(5, "Frankton")])),
        ]),
    )];
    let err = flatten(&tree, RegionPolicy::Skip, SuburbClassification::default()).unwrap_err();
    assert!(matches!(err, EtlError::DuplicateId { kind: "suburb", .. }), "{err:?}");
}

#[test]
fn custom_classification_is_stamped_on_every_suburb() {
    let classification = SuburbClassification {
        is_major_suburb: false,
        population_category: PopulationCategory::Low,
    };
    let h = flatten(&fixture(), RegionPolicy::Skip, classification).unwrap();
    assert!(h
        .suburbs
        .iter()
        .all(|s| !s.is_major_suburb && s.population_category == PopulationCategory::Low));
}

#[test]
fn malformed_json_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"[{"Name": "Auckland", "Districts": [{"Name": "no id"}]}]"#).unwrap();

    assert!(matches!(read_localities(&path), Err(EtlError::Json(_))));
    assert!(matches!(
        read_localities(dir.path().join("missing.json")),
        Err(EtlError::NotFound(_))
    ));
}

#[test]
fn writes_and_reads_back_hierarchy_csvs() {
    let h = flatten(&fixture(), RegionPolicy::Skip, SuburbClassification::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let districts_path = dir.path().join("districts.csv");
    let suburbs_path = dir.path().join("suburbs.csv");

    let stats = write_hierarchy(&h, &districts_path, &suburbs_path).unwrap();
    assert_eq!((stats.districts, stats.suburbs), (3, 3));

    let districts_csv = std::fs::read_to_string(&districts_path).unwrap();
    assert!(districts_csv.starts_with("district_id,region_id,name,display_name\n"));
    assert!(districts_csv.contains("D0007,R02,Auckland City,Auckland City\n"));

    let suburbs_csv = std::fs::read_to_string(&suburbs_path).unwrap();
    assert!(suburbs_csv.contains("S03101,D0031,\"Ahuriri, \"\"The Port\"\"\",true,high\n"));

    let rows = read_table_csv(&suburbs_path, Table::Suburbs).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2][2], "Ahuriri, \"The Port\"");
}

#[test]
fn extracts_regions_csv_from_localities() {
    let regions = extract_regions(&fixture());
    let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Auckland", "Chatham Islands", "Gisborne", "Hawke's Bay"]);
    assert_eq!(regions[0].region_id, "R02");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.csv");
    write_regions(&regions, &path).unwrap();
    let csv = std::fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with("region_id,name\nR02,Auckland\n"));
}

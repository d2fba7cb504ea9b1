// crates/nzaddr-core/src/model/raw.rs
use serde::Deserialize;

/// Raw suburb entry as it comes from the TradeMe localities JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SuburbRaw {
    #[serde(rename = "SuburbId")]
    pub suburb_id: u32,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Raw district entry. `Suburbs` is absent for a few rural districts.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictRaw {
    #[serde(rename = "DistrictId")]
    pub district_id: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Suburbs", default)]
    pub suburbs: Option<Vec<SuburbRaw>>,
}

/// Raw top-level locality (a region, or the synthetic `All` aggregate).
///
/// ```json
/// { "LocalityId": 1, "Name": "Auckland", "Districts": [ ... ] }
/// ```
///
/// Fields other than `Name` and `Districts` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalityRaw {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Districts", default)]
    pub districts: Option<Vec<DistrictRaw>>,
}

impl LocalityRaw {
    pub fn districts(&self) -> &[DistrictRaw] {
        self.districts.as_deref().unwrap_or_default()
    }
}

impl DistrictRaw {
    pub fn suburbs(&self) -> &[SuburbRaw] {
        self.suburbs.as_deref().unwrap_or_default()
    }
}

/// The whole localities document: a JSON array of localities.
pub type LocalitiesRaw = Vec<LocalityRaw>;

use crate::slug::Slug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    pub slug: Slug,
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub building_codes: String,
    pub climate: String,
    pub cities: Vec<Slug>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct City {
    pub name: String,
    pub description: String,
    pub population: u64,
    pub response_time: String,
    #[serde(default)]
    pub headquarters: bool,
    #[serde(default)]
    pub emergency_service: bool,
    pub neighborhoods: Vec<String>,
    pub specialties: Vec<String>,
    pub zip_codes: Vec<String>,
}

/// On-disk shape of `locations.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationTable {
    pub states: Vec<State>,
    pub cities: BTreeMap<Slug, City>,
}

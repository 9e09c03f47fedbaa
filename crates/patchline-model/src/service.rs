use crate::slug::Slug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub slug: Slug,
    pub name: String,
    pub description: String,
    pub price_range: String,
    pub timeline: String,
}

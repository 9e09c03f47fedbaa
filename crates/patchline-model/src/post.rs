use crate::slug::Slug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    pub slug: Slug,
    pub title: String,
    pub excerpt: String,
    /// Publication date as `YYYY-MM-DD`.
    pub published: String,
    /// Body paragraphs, rendered in order.
    pub body: Vec<String>,
}

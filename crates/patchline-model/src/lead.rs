use serde::{Deserialize, Serialize};

/// Contact form payload. Missing fields deserialize to empty strings so a
/// partial submission still produces a readable notification email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub service_type: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub service: String,
    pub description: String,
}

fn join_name(first: &str, last: &str) -> String {
    let full = format!("{} {}", first.trim(), last.trim());
    full.trim().to_string()
}

impl ContactSubmission {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

impl QuoteSubmission {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

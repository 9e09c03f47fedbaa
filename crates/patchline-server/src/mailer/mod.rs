//! Outbound transactional email.
//!
//! One provider call per message, no retry: a lead submission either reaches
//! the provider on the first attempt or the caller is told to try again.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

mod fake;
mod http;

pub use fake::FakeMailer;
pub use http::HttpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to build message: {0}")]
    Build(String),

    #[error("provider rejected send: status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    fn provider_tag(&self) -> &'static str;

    /// Delivers one message; returns the provider's response payload.
    async fn send(&self, message: &OutboundEmail) -> Result<serde_json::Value, MailError>;
}

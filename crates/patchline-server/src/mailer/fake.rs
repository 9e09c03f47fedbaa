// SPDX-License-Identifier: Apache-2.0

use crate::mailer::{MailError, Mailer, OutboundEmail};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// In-memory mailer for tests: records every message and counts provider
/// calls. Can be told to fail any send addressed to a specific recipient.
pub struct FakeMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub send_calls: AtomicU64,
    pub fail_to: Option<String>,
}

impl Default for FakeMailer {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            send_calls: AtomicU64::new(0),
            fail_to: None,
        }
    }
}

impl FakeMailer {
    #[must_use]
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            fail_to: Some(recipient.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    fn provider_tag(&self) -> &'static str {
        "fake"
    }

    async fn send(&self, message: &OutboundEmail) -> Result<serde_json::Value, MailError> {
        let n = self.send_calls.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(fail) = &self.fail_to {
            if message.to.iter().any(|t| t == fail) {
                return Err(MailError::Provider {
                    status: 500,
                    body: "forced failure".to_string(),
                });
            }
        }
        self.sent.lock().await.push(message.clone());
        Ok(json!({ "id": format!("fake-{n}") }))
    }
}

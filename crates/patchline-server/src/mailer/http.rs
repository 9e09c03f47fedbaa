// SPDX-License-Identifier: Apache-2.0

use crate::mailer::{MailError, Mailer, OutboundEmail};
use async_trait::async_trait;
use std::time::Duration;

pub struct HttpMailer {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpMailer {
    #[must_use]
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            endpoint,
            api_key,
            client,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    fn provider_tag(&self) -> &'static str {
        "http_api"
    }

    async fn send(&self, message: &OutboundEmail) -> Result<serde_json::Value, MailError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(MailError::Provider {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        // The provider response is opaque to us; pass it through verbatim.
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

// ABOUTME: HTTP lead submitter posting the quote as JSON to the configured intake endpoint

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use super::{LeadPayload, LeadSubmitter};
use crate::config::SubmissionConfig;
use crate::models::QuoteState;

#[derive(Debug, Clone)]
pub struct HttpLeadSubmitter {
    client: Client,
    endpoint: Url,
    source: String,
    form_type: String,
}

impl HttpLeadSubmitter {
    /// Create a submitter for an explicit endpoint
    pub fn new(endpoint: Url, source: String, form_type: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("shieldquote/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            source,
            form_type,
        })
    }

    /// Create a submitter from the `[submission]` config section
    pub fn from_config(config: &SubmissionConfig) -> Result<Self> {
        let endpoint = config
            .endpoint_url()?
            .ok_or_else(|| anyhow!("No submission endpoint configured"))?;

        Self::new(
            endpoint,
            config.source.clone(),
            config.form_type.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the quote. Fails on transport errors and non-2xx responses.
    pub async fn post(&self, quote: &QuoteState) -> Result<()> {
        let payload = LeadPayload::new(quote, &self.source, &self.form_type);
        let request_id = Uuid::new_v4();

        debug!(
            "Posting lead {} to {} ({} services)",
            request_id,
            self.endpoint,
            quote.services.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .header("Idempotency-Key", request_id.to_string())
            .json(&payload)
            .send()
            .await
            .context("Failed to reach the quote intake endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow!("Quote intake returned {}", status));
        }

        info!("Lead {} accepted ({})", request_id, response.status());
        Ok(())
    }
}

impl LeadSubmitter for HttpLeadSubmitter {
    async fn submit(&self, quote: &QuoteState) -> Result<()> {
        self.post(quote).await
    }
}

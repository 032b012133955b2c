// ABOUTME: Lead submission - hands a finished quote to the shop's lead intake endpoint

pub mod client;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::QuoteState;
use crate::wizard::ValidationError;

pub use client::HttpLeadSubmitter;

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Quotes can only be submitted from the review step")]
    NotReviewing,

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("{0}")]
    Incomplete(ValidationError),

    #[error("{0}")]
    Failed(String),
}

/// Anything that can deliver a quote as a lead
#[allow(async_fn_in_trait)]
pub trait LeadSubmitter {
    async fn submit(&self, quote: &QuoteState) -> anyhow::Result<()>;
}

/// Wire payload: the quote verbatim plus an envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload<'a> {
    #[serde(flatten)]
    pub quote: &'a QuoteState,
    pub submitted_at: DateTime<Utc>,
    pub source: &'a str,
    pub form_type: &'a str,
}

impl<'a> LeadPayload<'a> {
    pub fn new(quote: &'a QuoteState, source: &'a str, form_type: &'a str) -> Self {
        Self {
            quote,
            submitted_at: Utc::now(),
            source,
            form_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceKind;

    #[test]
    fn test_payload_flattens_quote_with_envelope() {
        let mut quote = QuoteState::default();
        quote.services.push(ServiceKind::Ppf);
        quote.contact.email = "jane@example.com".into();

        let payload = LeadPayload::new(&quote, "website", "multi-service-quote");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["services"][0], "Ppf");
        assert_eq!(json["contact"]["email"], "jane@example.com");
        assert_eq!(json["source"], "website");
        assert_eq!(json["formType"], "multi-service-quote");
        assert!(json["submittedAt"].is_string());
    }
}

// ABOUTME: Shared test fixtures for behavioral tests
//
// Provides:
// - wizard(): in-memory wizard, optionally seeded with a quote
// - complete_vehicle()/complete_contact(): details that pass the gates
// - run_timer(): fire every due transition without a wall clock
// - FakeSubmitter: scripted LeadSubmitter that records what it was sent

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use shieldquote::models::{ContactInfo, QuoteState, VehicleInfo};
use shieldquote::submission::LeadSubmitter;
use shieldquote::wizard::{MemorySessionStorage, QuoteStore, QuoteWizard, WizardTiming};

pub fn wizard() -> QuoteWizard {
    wizard_with(&QuoteState::default())
}

pub fn wizard_with(quote: &QuoteState) -> QuoteWizard {
    let storage = MemorySessionStorage::with_snapshot(quote).expect("snapshot");
    QuoteWizard::new(QuoteStore::open(Box::new(storage)), WizardTiming::default())
}

/// Wizard plus a handle on the storage slot it writes through to
pub fn wizard_with_storage(quote: &QuoteState) -> (QuoteWizard, MemorySessionStorage) {
    let storage = MemorySessionStorage::with_snapshot(quote).expect("snapshot");
    let handle = storage.clone();
    let wizard = QuoteWizard::new(QuoteStore::open(Box::new(storage)), WizardTiming::default());
    (wizard, handle)
}

pub fn complete_vehicle() -> VehicleInfo {
    VehicleInfo {
        year: "2021".into(),
        make: "Porsche".into(),
        model: "911".into(),
        color: "Guards Red".into(),
        ..Default::default()
    }
}

pub fn complete_contact() -> ContactInfo {
    ContactInfo {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        phone: "403-555-0100".into(),
        email: "jane@example.com".into(),
        ..Default::default()
    }
}

/// Fire the analysis timer and, when nothing is offered, the auto-advance
pub fn run_timer(wizard: &mut QuoteWizard) {
    let mut at = Instant::now();
    for _ in 0..2 {
        at += Duration::from_secs(60);
        wizard.tick(at);
    }
}

/// Fire only the analysis timer
pub fn run_analysis(wizard: &mut QuoteWizard) {
    wizard.tick(Instant::now() + Duration::from_secs(60));
}

/// Submitter that fails or succeeds on demand and records every quote sent
#[derive(Clone, Default)]
pub struct FakeSubmitter {
    pub fail_with: Option<String>,
    pub sent: Arc<Mutex<Vec<QuoteState>>>,
}

impl FakeSubmitter {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("lock").len()
    }
}

impl LeadSubmitter for FakeSubmitter {
    async fn submit(&self, quote: &QuoteState) -> anyhow::Result<()> {
        self.sent.lock().expect("lock").push(quote.clone());
        match &self.fail_with {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(()),
        }
    }
}

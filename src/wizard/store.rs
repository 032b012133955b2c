// ABOUTME: Configuration store - owns the canonical QuoteState and writes it through to storage

use tracing::{debug, info, warn};

use super::storage::SessionStorage;
use crate::models::promo::check_promo;
use crate::models::{PromoError, QuotePatch, QuoteState, ServiceKind};

/// Single source of truth for the quote being configured
pub struct QuoteStore {
    state: QuoteState,
    storage: Box<dyn SessionStorage>,
}

impl QuoteStore {
    /// Open the store, resuming a saved session when one can be read
    pub fn open(storage: Box<dyn SessionStorage>) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) => {
                info!("Resuming saved quote session ({} services)", state.services.len());
                state
            }
            Ok(None) => QuoteState::default(),
            Err(e) => {
                warn!("Discarding unreadable quote session: {:#}", e);
                QuoteState::default()
            }
        };

        Self { state, storage }
    }

    pub fn get(&self) -> &QuoteState {
        &self.state
    }

    /// Shallow-merge `patch` into the quote and persist the result
    pub fn merge(&mut self, patch: QuotePatch) -> &QuoteState {
        if patch.is_empty() {
            return &self.state;
        }
        patch.apply_to(&mut self.state);
        self.persist();
        &self.state
    }

    /// Restore defaults and forget the saved session
    pub fn reset(&mut self) -> &QuoteState {
        self.state = QuoteState::default();
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear saved quote session: {:#}", e);
        }
        info!("Quote reset to defaults");
        &self.state
    }

    /// Validate and apply a promo code. Returns the normalized code.
    pub fn add_promo_code(&mut self, input: &str) -> Result<String, PromoError> {
        let code = check_promo(input, &self.state.promo_codes)?;
        let mut codes = self.state.promo_codes.clone();
        codes.push(code.clone());
        self.merge(QuotePatch {
            promo_codes: Some(codes),
            ..Default::default()
        });
        info!("Applied promo code {}", code);
        Ok(code)
    }

    /// Apply a code when it is not already present. Used by offer actions,
    /// which only carry registry codes.
    pub fn ensure_promo_code(&mut self, code: &str) {
        if self.state.has_promo(code) {
            return;
        }
        if let Err(e) = self.add_promo_code(code) {
            warn!("Offer code rejected: {}", e);
        }
    }

    /// Remove an applied code; returns whether anything changed
    pub fn remove_promo_code(&mut self, code: &str) -> bool {
        let codes: Vec<String> = self
            .state
            .promo_codes
            .iter()
            .filter(|c| !c.eq_ignore_ascii_case(code.trim()))
            .cloned()
            .collect();
        if codes.len() == self.state.promo_codes.len() {
            return false;
        }
        self.merge(QuotePatch {
            promo_codes: Some(codes),
            ..Default::default()
        });
        true
    }

    /// Select a service; returns false when it was already selected
    pub fn add_service(&mut self, service: ServiceKind) -> bool {
        if self.state.has_service(service) {
            return false;
        }
        let mut services = self.state.services.clone();
        services.push(service);
        self.merge(QuotePatch::services(services));
        debug!("Service {:?} added", service);
        true
    }

    /// Deselect a service. The merge resets its configuration block so
    /// re-adding it starts clean.
    pub fn remove_service(&mut self, service: ServiceKind) -> bool {
        if !self.state.has_service(service) {
            return false;
        }
        let services = self
            .state
            .services
            .iter()
            .copied()
            .filter(|s| *s != service)
            .collect();
        self.merge(QuotePatch::services(services));
        debug!("Service {:?} removed and its configuration reset", service);
        true
    }

    pub fn toggle_service(&mut self, service: ServiceKind) {
        if !self.remove_service(service) {
            self.add_service(service);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.state) {
            warn!("Failed to persist quote session: {:#}", e);
        }
    }
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore").field("state", &self.state).finish_non_exhaustive()
    }
}

// ABOUTME: Navigation controller - the quote wizard's stateful orchestrator
//
// Holds the current step index over a step graph that is rebuilt from the store
// on every read, gates forward moves through validation, owns the analysis timer
// and the submission re-entrancy guard.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::promotions::{claim_free_zone, Opportunity, OpportunityKind, PromotionRules};
use super::steps::{build_steps, first_step, Step};
use super::store::QuoteStore;
use super::timer::{TransitionKind, TransitionTimer};
use super::validation::{validate, ValidationError};
use crate::models::promo::FREE_ADDON_CODE;
use crate::models::{PpfZone, PromoError, QuotePatch, QuoteState, ServiceKind};
use crate::submission::{LeadSubmitter, SubmissionError};

/// Delays for the two automatic transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardTiming {
    /// Pause on entering the analysis step before offers are computed
    pub analysis_delay: Duration,
    /// Pause before leaving an analysis step that produced no offers
    pub auto_advance_delay: Duration,
}

impl Default for WizardTiming {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(1500),
            auto_advance_delay: Duration::from_millis(2000),
        }
    }
}

/// Coarse wizard state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Configuring on the given step
    Active(Step),
    /// Analysis step entered, offers not computed yet
    Analyzing,
    /// On the review step, ready to submit
    Reviewing,
    /// Submission in flight
    Submitting,
    /// Lead submitted, terminal
    Success,
}

/// The quote wizard
#[derive(Debug)]
pub struct QuoteWizard {
    store: QuoteStore,
    timing: WizardTiming,
    rules: PromotionRules,
    index: usize,
    validation_error: Option<ValidationError>,
    promo_input: String,
    promo_error: Option<PromoError>,
    opportunities: Option<Vec<Opportunity>>,
    free_zone: Option<PpfZone>,
    timer: TransitionTimer,
    submitting: bool,
    submit_alert: Option<String>,
    completed: bool,
}

impl QuoteWizard {
    pub fn new(store: QuoteStore, timing: WizardTiming) -> Self {
        Self {
            store,
            timing,
            rules: PromotionRules::current(),
            index: 0,
            validation_error: None,
            promo_input: String::new(),
            promo_error: None,
            opportunities: None,
            free_zone: None,
            timer: TransitionTimer::default(),
            submitting: false,
            submit_alert: None,
            completed: false,
        }
    }

    /// Use `rules` for offer analysis instead of the current-year defaults
    pub fn with_rules(mut self, rules: PromotionRules) -> Self {
        self.rules = rules;
        self
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn quote(&self) -> &QuoteState {
        self.store.get()
    }

    /// Step graph for the current quote
    pub fn steps(&self) -> Vec<Step> {
        build_steps(self.store.get())
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> Step {
        let steps = self.steps();
        steps[self.index.min(steps.len() - 1)]
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation_error
    }

    pub fn promo_input(&self) -> &str {
        &self.promo_input
    }

    pub fn promo_error(&self) -> Option<&PromoError> {
        self.promo_error.as_ref()
    }

    /// Offers for the analysis screen; `None` while analysis is pending
    pub fn opportunities(&self) -> Option<&[Opportunity]> {
        self.opportunities.as_deref()
    }

    pub fn submit_alert(&self) -> Option<&str> {
        self.submit_alert.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Time until the next automatic transition, if one is scheduled
    pub fn pending_transition(&self, now: Instant) -> Option<(TransitionKind, Duration)> {
        self.timer.pending().map(|p| (p.kind, p.remaining(now)))
    }

    pub fn phase(&self) -> WizardPhase {
        if self.completed {
            return WizardPhase::Success;
        }
        if self.submitting {
            return WizardPhase::Submitting;
        }
        match self.current_step() {
            Step::Analysis if self.opportunities.is_none() => WizardPhase::Analyzing,
            Step::Review => WizardPhase::Reviewing,
            step => WizardPhase::Active(step),
        }
    }

    /// High-wear zone claimed with the free add-on code. Paid zones picked on
    /// the add-ons step are never reported here.
    pub fn claimed_free_zone(&self) -> Option<PpfZone> {
        let quote = self.store.get();
        self.free_zone
            .filter(|zone| quote.has_promo(FREE_ADDON_CODE) && quote.ppf.add_ons.contains(zone))
    }

    /// First step in `start..end` whose requirement is not met
    fn first_unmet(&self, steps: &[Step], start: usize, end: usize) -> Option<(usize, ValidationError)> {
        let quote = self.store.get();
        (start..end.min(steps.len()))
            .find_map(|i| validate(steps[i], quote).err().map(|e| (i, e)))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Merge a partial update. Any displayed validation error is cleared.
    pub fn merge(&mut self, patch: QuotePatch) {
        let anchor = self.current_step();
        self.store.merge(patch);
        self.after_mutation(anchor);
    }

    pub fn toggle_service(&mut self, service: ServiceKind) {
        let anchor = self.current_step();
        self.store.toggle_service(service);
        self.after_mutation(anchor);
    }

    pub fn set_promo_input(&mut self, input: impl Into<String>) {
        self.promo_input = input.into();
        self.promo_error = None;
    }

    /// Apply whatever is in the promo input
    pub fn apply_promo_input(&mut self) -> Result<String, PromoError> {
        match self.store.add_promo_code(&self.promo_input) {
            Ok(code) => {
                self.promo_input.clear();
                self.promo_error = None;
                self.validation_error = None;
                Ok(code)
            }
            Err(e) => {
                info!("Promo code rejected: {}", e);
                self.promo_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn remove_promo_code(&mut self, code: &str) -> bool {
        let anchor = self.current_step();
        let removed = self.store.remove_promo_code(code);
        if removed {
            self.after_mutation(anchor);
        }
        removed
    }

    /// Keep the user on the same screen after the graph is rebuilt
    fn after_mutation(&mut self, anchor: Step) {
        self.validation_error = None;
        let steps = self.steps();
        self.index = steps
            .iter()
            .position(|s| *s == anchor)
            .unwrap_or_else(|| self.index.min(steps.len() - 1));
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Advance past the current step if it validates
    pub fn next(&mut self) -> Result<Step, ValidationError> {
        let step = self.current_step();
        if let Err(e) = validate(step, self.store.get()) {
            info!("Cannot leave {:?}: {}", step, e);
            self.validation_error = Some(e);
            return Err(e);
        }
        self.validation_error = None;

        let steps = self.steps();
        let target = if step.is_service_ending() && self.store.get().details_complete() {
            match steps.iter().position(|s| *s == Step::Analysis) {
                // A service added later may still need configuring
                Some(analysis) => match self.first_unmet(&steps, self.index + 1, analysis) {
                    Some((unmet, _)) => {
                        debug!("Skipping ahead to unconfigured {:?}", steps[unmet]);
                        unmet
                    }
                    None => {
                        debug!("Service block finished with details complete, returning to analysis");
                        analysis
                    }
                },
                None => (self.index + 1).min(steps.len() - 1),
            }
        } else {
            (self.index + 1).min(steps.len() - 1)
        };

        self.move_to(target, Instant::now());
        Ok(self.current_step())
    }

    /// Go back one step without validating
    pub fn back(&mut self) -> Step {
        let target = self.index.saturating_sub(1);
        self.move_to(target, Instant::now());
        self.current_step()
    }

    /// Select `service` if needed and jump to `start` in the rebuilt graph
    pub fn jump_to_service(&mut self, service: ServiceKind, start: Step) -> Step {
        self.store.add_service(service);
        self.validation_error = None;

        let steps = self.steps();
        let target = steps
            .iter()
            .position(|s| *s == start)
            .or_else(|| steps.iter().position(|s| *s == first_step(service)))
            .unwrap_or(self.index.min(steps.len() - 1));

        info!("Jumping to {:?} for {:?}", steps[target], service);
        self.move_to(target, Instant::now());
        self.current_step()
    }

    fn move_to(&mut self, target: usize, now: Instant) {
        let previous = self.current_step();
        self.index = target;
        let current = self.current_step();
        if previous == current {
            return;
        }

        if self.timer.cancel().is_some() {
            debug!("Cancelled pending transition on leaving {:?}", previous);
        }
        debug!("Step {:?} -> {:?}", previous, current);

        if current == Step::Analysis {
            self.opportunities = None;
            self.timer.schedule(TransitionKind::Analyze, self.timing.analysis_delay, now);
        }
    }

    /// Fire a due transition. Returns true when something changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.take_due(now) {
            Some(TransitionKind::Analyze) => {
                let opportunities = self.rules.analyze(self.store.get());
                info!("Quote analysis produced {} offers", opportunities.len());
                if opportunities.is_empty() {
                    self.timer.schedule(
                        TransitionKind::AutoAdvance,
                        self.timing.auto_advance_delay,
                        now,
                    );
                }
                self.opportunities = Some(opportunities);
                true
            }
            Some(TransitionKind::AutoAdvance) => {
                debug!("No offers, moving on from analysis");
                let steps = self.steps();
                self.move_to((self.index + 1).min(steps.len() - 1), now);
                true
            }
            None => false,
        }
    }

    /// Stop timers when the wizard is closed
    pub fn close(&mut self) {
        if self.timer.cancel().is_some() {
            debug!("Cancelled pending transition on close");
        }
    }

    /// Discard the quote and start from the first step. Callers confirm
    /// with the user first.
    pub fn start_over(&mut self) {
        self.timer.cancel();
        self.store.reset();
        self.index = 0;
        self.validation_error = None;
        self.promo_input.clear();
        self.promo_error = None;
        self.opportunities = None;
        self.free_zone = None;
        self.submit_alert = None;
        self.submitting = false;
        self.completed = false;
        info!("Quote wizard started over");
    }

    // ------------------------------------------------------------------
    // Offers
    // ------------------------------------------------------------------

    /// Claim one of the free high-wear zones. Claiming a second replaces the first.
    pub fn claim_free_addon(&mut self, zone: PpfZone) -> bool {
        let eligible = self.opportunities.as_deref().is_some_and(|offers| {
            offers.iter().any(|o| {
                o.kind == OpportunityKind::FreeAddon
                    && o.eligible_addons.as_ref().is_some_and(|z| z.contains(&zone))
            })
        });
        if !eligible {
            warn!("{:?} is not an eligible free add-on right now", zone);
            return false;
        }

        let anchor = self.current_step();
        let ppf = claim_free_zone(&self.store.get().ppf, zone);
        self.store.merge(QuotePatch::ppf(ppf));
        self.store.ensure_promo_code(FREE_ADDON_CODE);
        self.free_zone = Some(zone);
        self.after_mutation(anchor);
        info!("Claimed free add-on {:?}", zone);
        true
    }

    /// Take an upsell: enable its service, apply its code and jump to the
    /// service's first step.
    pub fn accept_upsell(&mut self, opportunity: &Opportunity) -> Option<Step> {
        let service = opportunity.service_to_enable?;
        self.store.ensure_promo_code(opportunity.code);
        info!("Accepted upsell {} for {:?}", opportunity.code, service);
        Some(self.jump_to_service(service, first_step(service)))
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Take the submission guard and hand out the quote to send.
    ///
    /// Every step is gated again first; an unmet one becomes the current step.
    pub fn begin_submission(&mut self) -> Result<QuoteState, SubmissionError> {
        if self.completed || self.current_step() != Step::Review {
            return Err(SubmissionError::NotReviewing);
        }
        if self.submitting {
            return Err(SubmissionError::AlreadySubmitting);
        }
        let steps = self.steps();
        if let Some((unmet, e)) = self.first_unmet(&steps, 0, steps.len()) {
            warn!("Quote incomplete at {:?}: {}", steps[unmet], e);
            self.move_to(unmet, Instant::now());
            self.validation_error = Some(e);
            return Err(SubmissionError::Incomplete(e));
        }
        self.submitting = true;
        self.submit_alert = None;
        info!("Submitting quote");
        Ok(self.store.get().clone())
    }

    /// Release the guard with the collaborator's outcome
    pub fn finish_submission(&mut self, outcome: anyhow::Result<()>) -> Result<(), SubmissionError> {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                info!("Quote submitted");
                self.timer.cancel();
                self.store.reset();
                self.index = 0;
                self.opportunities = None;
                self.free_zone = None;
                self.promo_input.clear();
                self.promo_error = None;
                self.completed = true;
                Ok(())
            }
            Err(e) => {
                error!("Quote submission failed: {:#}", e);
                let message = format!("We couldn't send your quote request: {e}. Please try again.");
                self.submit_alert = Some(message.clone());
                Err(SubmissionError::Failed(message))
            }
        }
    }

    /// Send the quote through `submitter`
    pub async fn submit<S: LeadSubmitter>(&mut self, submitter: &S) -> Result<(), SubmissionError> {
        let quote = self.begin_submission()?;
        let outcome = submitter.submit(&quote).await;
        self.finish_submission(outcome)
    }

    pub fn dismiss_alert(&mut self) {
        self.submit_alert = None;
    }
}

// ABOUTME: Application state for the quote TUI - wraps the wizard with cursor, dialogs and notifications

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::step_view::{self, Field, Row, RowAction, RowKind};
use crate::config::AppConfig;
use crate::submission::{HttpLeadSubmitter, SubmissionError};
use crate::wizard::{QuoteStore, QuoteWizard, Step, WizardPhase};

/// Notification system for TUI messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Success,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Error,
            created_at: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    pub fn info(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Info,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_action: ConfirmAction,
    pub selected_option: bool, // true = Yes, false = No
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    StartOver,
}

pub struct AppState {
    pub wizard: QuoteWizard,
    pub selected_row: usize,
    pub confirmation_dialog: Option<ConfirmationDialog>,
    pub notifications: Vec<Notification>,
    pub should_quit: bool,

    submitter: Option<Arc<HttpLeadSubmitter>>,
    pending_submission: Option<oneshot::Receiver<anyhow::Result<()>>>,
    last_step: Step,
}

impl AppState {
    pub fn new(wizard: QuoteWizard, submitter: Option<HttpLeadSubmitter>) -> Self {
        let last_step = wizard.current_step();
        Self {
            wizard,
            selected_row: 0,
            confirmation_dialog: None,
            notifications: Vec::new(),
            should_quit: false,
            submitter: submitter.map(Arc::new),
            pending_submission: None,
            last_step,
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        step_view::rows(&self.wizard)
    }

    pub fn focused_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.selected_row)
    }

    /// Text field under the cursor, if any
    pub fn focused_field(&self) -> Option<Field> {
        self.focused_row().and_then(|row| row.field_kind())
    }

    pub fn has_pending_submission(&self) -> bool {
        self.pending_submission.is_some()
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    pub fn cursor_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let count = self.rows().len();
        if count > 0 && self.selected_row + 1 < count {
            self.selected_row += 1;
        }
    }

    /// Reset the cursor when the step changed and keep it inside the row list
    fn sync_cursor(&mut self) {
        let step = self.wizard.current_step();
        if step != self.last_step {
            self.last_step = step;
            self.selected_row = 0;
        }
        let count = self.rows().len();
        if self.selected_row >= count {
            self.selected_row = count.saturating_sub(1);
        }
    }

    // ------------------------------------------------------------------
    // Wizard actions
    // ------------------------------------------------------------------

    /// Space: select, toggle or press the focused row
    pub fn activate_focused(&mut self) {
        if let Some(row) = self.focused_row() {
            self.apply_action(row.action);
        }
        self.sync_cursor();
    }

    /// Enter: press buttons and apply the promo input, otherwise move forward.
    /// A single-choice row is selected before advancing.
    pub fn confirm(&mut self) {
        match self.focused_row() {
            Some(Row { kind: RowKind::Action, action, .. }) => self.apply_action(action),
            Some(Row { action: RowAction::Edit(Field::PromoCode), .. }) => self.apply_promo(),
            Some(Row { kind: RowKind::Choice(_), action, .. }) if self.wizard.current_step() != Step::Analysis => {
                self.apply_action(action);
                self.advance();
            }
            _ => self.advance(),
        }
        self.sync_cursor();
    }

    pub fn go_back(&mut self) {
        self.wizard.back();
        self.sync_cursor();
    }

    fn advance(&mut self) {
        if let Err(e) = self.wizard.next() {
            debug!("Advance blocked: {}", e);
        }
    }

    fn apply_promo(&mut self) {
        match self.wizard.apply_promo_input() {
            Ok(code) => self.add_success_notification(format!("Promo code {code} applied")),
            Err(e) => debug!("Promo input rejected: {}", e),
        }
    }

    fn apply_action(&mut self, action: RowAction) {
        match action {
            RowAction::ToggleService(service) => self.wizard.toggle_service(service),
            RowAction::Edit(_) => {}
            RowAction::ClaimFreeAddon(zone) => {
                if self.wizard.claim_free_addon(zone) {
                    self.add_success_notification(format!("{} added free", zone.label()));
                }
            }
            RowAction::AcceptUpsell(index) => {
                let offer = self.wizard.opportunities().and_then(|o| o.get(index)).cloned();
                if let Some(offer) = offer {
                    if self.wizard.accept_upsell(&offer).is_some() {
                        self.add_info_notification(format!("{} applied", offer.code));
                    }
                }
            }
            RowAction::ContinueFromOffers => self.advance(),
            RowAction::RemovePromo(code) => {
                if self.wizard.remove_promo_code(&code) {
                    self.add_info_notification(format!("Promo code {code} removed"));
                }
            }
            RowAction::Submit => self.start_submission(),
            other => {
                if let Some(patch) = step_view::selection_patch(self.wizard.quote(), &other) {
                    self.wizard.merge(patch);
                }
            }
        }
    }

    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = step_view::field_value(&self.wizard, field);
        if !field.accepts(&value, c) {
            return;
        }
        value.push(c);
        self.set_field(field, value);
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = step_view::field_value(&self.wizard, field);
        if value.pop().is_some() {
            self.set_field(field, value);
        }
    }

    fn set_field(&mut self, field: Field, value: String) {
        match step_view::field_patch(self.wizard.quote(), field, value.clone()) {
            Some(patch) => self.wizard.merge(patch),
            None => self.wizard.set_promo_input(value),
        }
    }

    // ------------------------------------------------------------------
    // Start over
    // ------------------------------------------------------------------

    pub fn show_start_over_confirmation(&mut self) {
        self.confirmation_dialog = Some(ConfirmationDialog {
            title: " Start Over ".to_string(),
            message: "Discard this quote and start again from the first step?".to_string(),
            confirm_action: ConfirmAction::StartOver,
            selected_option: false,
        });
    }

    pub fn run_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::StartOver => {
                if self.pending_submission.take().is_some() {
                    warn!("Starting over with a submission in flight; its result will be ignored");
                }
                self.wizard.start_over();
                self.add_info_notification("Quote cleared".to_string());
            }
        }
        self.sync_cursor();
    }

    /// Begin a fresh quote after a successful submission
    pub fn new_quote(&mut self) {
        self.wizard.start_over();
        self.sync_cursor();
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Hand the quote to the submitter on a background task
    pub fn start_submission(&mut self) {
        let quote = match self.wizard.begin_submission() {
            Ok(quote) => quote,
            Err(SubmissionError::Incomplete(e)) => {
                self.add_error_notification(format!("Finish this step before submitting: {e}"));
                return;
            }
            Err(e) => {
                warn!("Submission not started: {}", e);
                return;
            }
        };

        let Some(submitter) = self.submitter.clone() else {
            if let Err(e) = self
                .wizard
                .finish_submission(Err(anyhow!("no submission endpoint is configured")))
            {
                warn!("Submission refused without an endpoint: {}", e);
            }
            return;
        };

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = submitter.post(&quote).await;
            let _ = tx.send(outcome);
        });
        self.pending_submission = Some(rx);
    }

    fn poll_submission(&mut self) -> bool {
        let Some(rx) = self.pending_submission.as_mut() else {
            return false;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => Err(anyhow!("submission task ended unexpectedly")),
        };
        self.pending_submission = None;

        if self.wizard.finish_submission(outcome).is_ok() {
            self.add_success_notification("Quote request sent".to_string());
        }
        true
    }

    // ------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------

    /// Drive timers and collect background results. Returns true when the
    /// screen needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.wizard.tick(now);
        let submitted = self.poll_submission();
        let before = self.notifications.len();
        self.cleanup_expired_notifications();

        if fired || submitted {
            self.sync_cursor();
        }
        fired || submitted || before != self.notifications.len()
    }

    pub fn phase(&self) -> WizardPhase {
        self.wizard.phase()
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn add_success_notification(&mut self, message: String) {
        self.add_notification(Notification::success(message));
    }

    pub fn add_error_notification(&mut self, message: String) {
        self.add_notification(Notification::error(message));
    }

    pub fn add_info_notification(&mut self, message: String) {
        self.add_notification(Notification::info(message));
    }

    pub fn cleanup_expired_notifications(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn get_current_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.is_expired()).collect()
    }
}

/// Top-level application
pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(store: QuoteStore, config: &AppConfig) -> Self {
        let submitter = match HttpLeadSubmitter::from_config(&config.submission) {
            Ok(submitter) => {
                info!("Submitting leads to {}", submitter.endpoint());
                Some(submitter)
            }
            Err(e) => {
                warn!("Lead submission unavailable: {:#}", e);
                None
            }
        };

        let wizard = QuoteWizard::new(store, config.wizard.timing())
            .with_rules(config.wizard.promotion_rules());
        let mut state = AppState::new(wizard, submitter);
        if state.wizard.quote().services.is_empty() {
            state.add_info_notification("Pick the services you'd like quoted".to_string());
        } else {
            state.add_info_notification("Resumed your saved quote".to_string());
        }
        Self { state }
    }

    pub fn tick(&mut self) -> bool {
        self.state.tick(Instant::now())
    }

    /// Cancel timers before the terminal is torn down
    pub fn shutdown(&mut self) {
        self.state.wizard.close();
        if self.state.has_pending_submission() {
            warn!("Exiting with a quote submission still in flight");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactInfo, QuoteState, ServiceKind, VehicleInfo};
    use crate::wizard::{MemorySessionStorage, WizardTiming};

    fn state() -> AppState {
        let store = QuoteStore::open(Box::new(MemorySessionStorage::new()));
        AppState::new(QuoteWizard::new(store, WizardTiming::default()), None)
    }

    #[test]
    fn test_space_toggles_focused_service() {
        let mut s = state();
        s.cursor_down();
        s.activate_focused();
        assert_eq!(s.wizard.quote().services, vec![ServiceKind::Tint]);
        s.activate_focused();
        assert!(s.wizard.quote().services.is_empty());
    }

    #[test]
    fn test_cursor_is_clamped_and_reset_on_step_change() {
        let mut s = state();
        for _ in 0..20 {
            s.cursor_down();
        }
        assert_eq!(s.selected_row, ServiceKind::ALL.len() - 1);

        s.activate_focused();
        s.confirm();
        assert_eq!(s.wizard.current_step(), Step::Detailing);
        assert_eq!(s.selected_row, 0);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut s = state();
        s.wizard.toggle_service(ServiceKind::Detailing);
        s.confirm();
        s.confirm();
        assert_eq!(s.wizard.current_step(), Step::Vehicle);

        for c in "20x24".chars() {
            s.input_char(c);
        }
        assert_eq!(s.wizard.quote().vehicle.year, "2024");
        s.backspace();
        assert_eq!(s.wizard.quote().vehicle.year, "202");
    }

    #[test]
    fn test_enter_on_choice_selects_and_advances() {
        let mut s = state();
        s.wizard.toggle_service(ServiceKind::Ppf);
        s.confirm();
        assert_eq!(s.wizard.current_step(), Step::PpfType);

        s.confirm();
        assert_eq!(s.wizard.current_step(), Step::PpfPackage);
        assert!(s.wizard.quote().ppf.film_type.is_some());
    }

    #[test]
    fn test_start_over_needs_confirmation() {
        let mut s = state();
        s.wizard.toggle_service(ServiceKind::Ppf);
        s.show_start_over_confirmation();
        assert!(s.wizard.quote().has_service(ServiceKind::Ppf));

        let dialog = s.confirmation_dialog.take().unwrap();
        s.run_confirmed(dialog.confirm_action);
        assert_eq!(s.wizard.quote(), &QuoteState::default());
    }

    fn reviewing_detailing_quote() -> AppState {
        let quote = QuoteState {
            services: vec![ServiceKind::Detailing],
            vehicle: VehicleInfo {
                year: "2019".into(),
                make: "Ford".into(),
                model: "F-150".into(),
                ..Default::default()
            },
            contact: ContactInfo {
                first_name: "Sam".into(),
                last_name: "Lee".into(),
                phone: "555-0100".into(),
                email: "sam@example.com".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let store = QuoteStore::open(Box::new(MemorySessionStorage::with_snapshot(&quote).unwrap()));
        let mut s = AppState::new(QuoteWizard::new(store, WizardTiming::default()), None);

        s.wizard.next().unwrap();
        assert_eq!(s.wizard.next(), Ok(Step::Analysis));
        assert_eq!(s.wizard.next(), Ok(Step::Review));
        s
    }

    #[test]
    fn test_submit_with_unconfigured_service_goes_back_to_it() {
        let mut s = reviewing_detailing_quote();
        s.wizard.toggle_service(ServiceKind::Undercoating);
        assert_eq!(s.wizard.current_step(), Step::Review);

        s.start_submission();
        assert_eq!(s.wizard.current_step(), Step::Undercoating);
        assert!(s.wizard.submit_alert().is_none());
        assert!(s
            .notifications
            .iter()
            .any(|n| n.notification_type == NotificationType::Error));
    }

    #[test]
    fn test_submit_without_endpoint_raises_alert() {
        let mut s = reviewing_detailing_quote();
        let quote = s.wizard.quote().clone();

        s.start_submission();
        assert_eq!(s.phase(), WizardPhase::Reviewing);
        assert!(s.wizard.submit_alert().unwrap().contains("no submission endpoint"));
        assert!(!s.has_pending_submission());
        assert_eq!(s.wizard.quote(), &quote);
    }
}

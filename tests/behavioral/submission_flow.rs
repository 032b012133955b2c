// ABOUTME: Behavioral tests for lead submission from the review step
//
// Uses an in-test submitter so outcomes are scripted and no network is touched.

use pretty_assertions::assert_eq;

use shieldquote::models::{QuoteState, ServiceKind};
use shieldquote::submission::SubmissionError;
use shieldquote::wizard::{QuoteWizard, Step, WizardPhase};

use crate::fixtures::{complete_contact, complete_vehicle, run_timer, wizard_with_storage, FakeSubmitter};

fn reviewing() -> (QuoteWizard, QuoteState, shieldquote::wizard::MemorySessionStorage) {
    let quote = QuoteState {
        services: vec![ServiceKind::Detailing],
        detailing_notes: "Dog hair everywhere".into(),
        vehicle: complete_vehicle(),
        contact: complete_contact(),
        ..Default::default()
    };
    let (mut w, storage) = wizard_with_storage(&quote);
    while w.current_step() != Step::Analysis {
        w.next().unwrap();
    }
    run_timer(&mut w);
    assert_eq!(w.phase(), WizardPhase::Reviewing);
    (w, quote, storage)
}

/// Scenario F: a failed submission leaves the customer on review with everything intact
#[tokio::test]
async fn test_failed_submission_keeps_quote_and_releases_guard() {
    let (mut w, quote, storage) = reviewing();
    let submitter = FakeSubmitter::failing("503 Service Unavailable");

    let result = w.submit(&submitter).await;

    assert!(matches!(result, Err(SubmissionError::Failed(_))));
    assert_eq!(w.phase(), WizardPhase::Reviewing);
    assert_eq!(w.quote(), &quote);
    assert!(storage.raw().is_some());
    assert!(!w.is_submitting());
    assert!(w.submit_alert().unwrap().contains("503 Service Unavailable"));

    // Guard released: a retry goes out
    w.dismiss_alert();
    w.submit(&submitter).await.unwrap_err();
    assert_eq!(submitter.sent_count(), 2);
}

#[tokio::test]
async fn test_successful_submission_clears_quote() {
    let (mut w, quote, storage) = reviewing();
    let submitter = FakeSubmitter::succeeding();

    w.submit(&submitter).await.unwrap();

    assert_eq!(w.phase(), WizardPhase::Success);
    assert_eq!(w.quote(), &QuoteState::default());
    assert!(storage.raw().is_none());
    assert_eq!(submitter.sent.lock().unwrap().as_slice(), &[quote]);
}

#[tokio::test]
async fn test_submission_only_from_review() {
    let (mut w, _storage) = wizard_with_storage(&QuoteState::default());
    let submitter = FakeSubmitter::succeeding();

    assert_eq!(w.submit(&submitter).await, Err(SubmissionError::NotReviewing));
    assert_eq!(submitter.sent_count(), 0);
}

#[test]
fn test_second_submit_while_in_flight_is_refused() {
    let (mut w, _, _) = reviewing();

    let first = w.begin_submission().unwrap();
    assert_eq!(first.detailing_notes, "Dog hair everywhere");
    assert_eq!(w.begin_submission(), Err(SubmissionError::AlreadySubmitting));

    w.finish_submission(Err(anyhow::anyhow!("timed out"))).unwrap_err();
    assert!(w.begin_submission().is_ok());
}

#[test]
fn test_start_over_from_success() {
    let (mut w, _, _) = reviewing();
    w.begin_submission().unwrap();
    w.finish_submission(Ok(())).unwrap();
    assert_eq!(w.phase(), WizardPhase::Success);

    w.start_over();
    assert_eq!(w.phase(), WizardPhase::Active(Step::Services));
}

// ABOUTME: Behavioral tests for the analysis step - timers, free add-on claims and upsell jumps

use std::time::Instant;

use pretty_assertions::assert_eq;

use shieldquote::models::promo::{CERAMIC_GOLD_CODE, FREE_ADDON_CODE};
use shieldquote::models::{
    CeramicConfig, CeramicPackage, FilmType, PpfConfig, PpfPackage, PpfZone, QuotePatch, QuoteState,
    ServiceKind, TintConfig, TintPackage, TintType,
};
use shieldquote::submission::SubmissionError;
use shieldquote::wizard::{OpportunityKind, Step, TransitionKind, ValidationError, WizardPhase};

use crate::fixtures::{
    complete_contact, complete_vehicle, run_analysis, run_timer, wizard_with, FakeSubmitter,
};

fn gold_ppf_quote() -> QuoteState {
    QuoteState {
        services: vec![ServiceKind::Ppf],
        ppf: PpfConfig::default().with_film_type(FilmType::Clear).with_package(PpfPackage::Gold),
        vehicle: complete_vehicle(),
        contact: complete_contact(),
        ..Default::default()
    }
}

/// Walk a fully detailed quote to the analysis step
fn at_analysis(quote: &QuoteState) -> shieldquote::wizard::QuoteWizard {
    let mut w = wizard_with(quote);
    while w.current_step() != Step::Analysis {
        w.next().expect("quote is complete");
    }
    w
}

#[test]
fn test_finishing_a_service_with_details_jumps_to_analysis() {
    let mut w = wizard_with(&gold_ppf_quote());
    assert_eq!(w.next(), Ok(Step::PpfType));
    assert_eq!(w.next(), Ok(Step::PpfPackage));
    assert_eq!(w.next(), Ok(Step::PpfAddons));
    assert_eq!(w.next(), Ok(Step::Analysis));
    assert_eq!(w.phase(), WizardPhase::Analyzing);
    assert!(matches!(
        w.pending_transition(Instant::now()),
        Some((TransitionKind::Analyze, _))
    ));
}

#[test]
fn test_offers_appear_only_after_the_delay() {
    let mut w = at_analysis(&gold_ppf_quote());
    assert!(w.opportunities().is_none());
    assert!(!w.tick(Instant::now()));

    run_analysis(&mut w);
    let kinds: Vec<_> = w.opportunities().unwrap().iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![OpportunityKind::FreeAddon, OpportunityKind::Upsell, OpportunityKind::Upsell]
    );
    // Offers stay on screen until the customer acts
    assert!(w.pending_transition(Instant::now()).is_none());
    assert_eq!(w.current_step(), Step::Analysis);
}

#[test]
fn test_no_offers_auto_advances_to_review() {
    let quote = QuoteState {
        services: vec![ServiceKind::Detailing],
        vehicle: complete_vehicle(),
        contact: complete_contact(),
        ..Default::default()
    };
    let mut w = at_analysis(&quote);

    run_timer(&mut w);
    assert_eq!(w.opportunities(), Some(&[][..]));
    assert_eq!(w.current_step(), Step::Review);
    assert_eq!(w.phase(), WizardPhase::Reviewing);
}

#[test]
fn test_free_addon_claim_is_exclusive() {
    let mut quote = gold_ppf_quote();
    quote.ppf = quote.ppf.toggle_zone(PpfZone::Mirrors);
    let mut w = at_analysis(&quote);
    run_analysis(&mut w);

    assert!(w.claim_free_addon(PpfZone::DoorCups));
    assert!(w.claim_free_addon(PpfZone::RockerPanels));

    let high_wear: Vec<_> = w
        .quote()
        .ppf
        .add_ons
        .iter()
        .copied()
        .filter(|z| PpfZone::HIGH_WEAR.contains(z))
        .collect();
    assert_eq!(high_wear, vec![PpfZone::RockerPanels]);
    assert!(w.quote().ppf.add_ons.contains(&PpfZone::Mirrors));
    assert_eq!(w.quote().promo_codes, vec![FREE_ADDON_CODE.to_string()]);
    assert_eq!(w.claimed_free_zone(), Some(PpfZone::RockerPanels));
}

#[test]
fn test_non_high_wear_zone_cannot_be_claimed() {
    let mut w = at_analysis(&gold_ppf_quote());
    run_analysis(&mut w);

    assert!(!w.claim_free_addon(PpfZone::Headlights));
    assert!(w.quote().promo_codes.is_empty());
}

#[test]
fn test_upsell_jumps_to_service_and_returns_to_analysis() {
    let mut w = at_analysis(&gold_ppf_quote());
    run_analysis(&mut w);

    let ceramic = w
        .opportunities()
        .unwrap()
        .iter()
        .find(|o| o.service_to_enable == Some(ServiceKind::Ceramic))
        .cloned()
        .unwrap();
    assert_eq!(w.accept_upsell(&ceramic), Some(Step::CeramicPackage));
    assert!(w.quote().has_service(ServiceKind::Ceramic));
    assert!(w.quote().has_promo(CERAMIC_GOLD_CODE));

    assert_eq!(w.next(), Err(ValidationError::CeramicPackage));
    w.merge(QuotePatch::ceramic(CeramicConfig {
        package: Some(CeramicPackage::Enhanced),
        ..Default::default()
    }));
    assert_eq!(w.next(), Ok(Step::CeramicAddons));

    // Details are complete, so finishing the block goes straight back to the offers
    assert_eq!(w.next(), Ok(Step::Analysis));
    assert_eq!(w.phase(), WizardPhase::Analyzing);

    run_analysis(&mut w);
    let offers = w.opportunities().unwrap();
    assert!(offers.iter().all(|o| o.service_to_enable != Some(ServiceKind::Ceramic)));
    assert!(offers.iter().any(|o| o.service_to_enable == Some(ServiceKind::Tint)));
}

#[test]
fn test_service_added_after_review_is_configured_before_analysis() {
    let mut w = at_analysis(&gold_ppf_quote());
    run_analysis(&mut w);
    assert_eq!(w.next(), Ok(Step::Review));

    while w.current_step() != Step::Services {
        w.back();
    }
    w.toggle_service(ServiceKind::Tint);

    let mut path = vec![w.current_step()];
    while let Ok(step) = w.next() {
        path.push(step);
    }
    assert_eq!(
        path,
        vec![Step::Services, Step::PpfType, Step::PpfPackage, Step::PpfAddons, Step::TintType]
    );
    assert_eq!(w.validation_error(), Some(ValidationError::TintType));

    w.merge(QuotePatch::tint(TintConfig {
        tint_type: Some(TintType::NanoCeramic),
        package: Some(TintPackage::AllSides),
        ..Default::default()
    }));
    assert_eq!(w.next(), Ok(Step::TintPackage));
    assert_eq!(w.next(), Ok(Step::TintAddons));
    assert_eq!(w.next(), Ok(Step::Analysis));
}

#[tokio::test]
async fn test_review_with_unconfigured_service_refuses_submission() {
    let mut w = at_analysis(&gold_ppf_quote());
    run_analysis(&mut w);
    assert_eq!(w.next(), Ok(Step::Review));

    w.toggle_service(ServiceKind::Ceramic);
    assert_eq!(w.current_step(), Step::Review);

    let submitter = FakeSubmitter::succeeding();
    assert_eq!(
        w.submit(&submitter).await,
        Err(SubmissionError::Incomplete(ValidationError::CeramicPackage))
    );
    assert_eq!(w.current_step(), Step::CeramicPackage);
    assert_eq!(submitter.sent_count(), 0);
}

#[test]
fn test_paid_high_wear_zone_is_not_reported_as_free() {
    let mut w = at_analysis(&gold_ppf_quote());
    run_analysis(&mut w);
    assert!(w.claim_free_addon(PpfZone::RockerPanels));

    let ppf = w.quote().ppf.clone().toggle_zone(PpfZone::DoorCups);
    w.merge(QuotePatch::ppf(ppf));
    assert_eq!(w.claimed_free_zone(), Some(PpfZone::RockerPanels));
}

#[test]
fn test_back_from_analysis_cancels_pending_analysis() {
    let mut w = at_analysis(&gold_ppf_quote());
    assert_eq!(w.back(), Step::Contact);
    assert!(w.pending_transition(Instant::now()).is_none());

    run_timer(&mut w);
    assert!(w.opportunities().is_none());
    assert_eq!(w.current_step(), Step::Contact);
}

// ABOUTME: Behavioral tests for the step graph, validation gate and promo input
//
// Covers the headline quote scenarios: empty selection, fashion film colour
// step, gold-tier ceramic upsell, duplicate promo code and contact gating.

use pretty_assertions::assert_eq;

use shieldquote::models::promo::{CERAMIC_GOLD_CODE, FREE_ADDON_CODE};
use shieldquote::models::{FilmType, PpfConfig, PpfPackage, PromoError, QuotePatch, QuoteState, ServiceKind};
use shieldquote::wizard::{analyze, build_steps, OpportunityKind, Step, ValidationError};

use crate::fixtures::{complete_contact, complete_vehicle, wizard, wizard_with};

/// Scenario A: no services gives the bare graph and blocks the first step
#[test]
fn test_empty_quote_graph_and_gate() {
    let mut w = wizard();

    assert_eq!(
        w.steps(),
        vec![Step::Services, Step::Vehicle, Step::Contact, Step::Analysis, Step::Review]
    );
    assert_eq!(w.next(), Err(ValidationError::NoServices));
    assert_eq!(w.current_step(), Step::Services);
    assert_eq!(
        w.validation_error().map(|e| e.to_string()).as_deref(),
        Some("Please select at least one service")
    );
}

/// Scenario B: fashion film inserts the colour step, clear film does not
#[test]
fn test_fashion_film_adds_colour_step() {
    let mut quote = QuoteState { services: vec![ServiceKind::Ppf], ..Default::default() };
    quote.ppf = PpfConfig::default().with_film_type(FilmType::Fashion);

    let steps = build_steps(&quote);
    let film = steps.iter().position(|s| *s == Step::PpfType).unwrap();
    assert_eq!(&steps[film..film + 3], &[Step::PpfType, Step::PpfColor, Step::PpfPackage]);

    quote.ppf = quote.ppf.with_film_type(FilmType::Clear);
    assert!(!build_steps(&quote).contains(&Step::PpfColor));
}

#[test]
fn test_colour_step_requires_a_colour() {
    let mut w = wizard_with(&QuoteState { services: vec![ServiceKind::Ppf], ..Default::default() });
    w.next().unwrap();
    w.merge(QuotePatch::ppf(PpfConfig::default().with_film_type(FilmType::Fashion)));
    assert_eq!(w.next(), Ok(Step::PpfColor));

    assert_eq!(w.next(), Err(ValidationError::FashionColor));

    let mut ppf = w.quote().ppf.clone();
    ppf.fashion_color = Some("Satin Black".into());
    w.merge(QuotePatch::ppf(ppf));
    assert_eq!(w.next(), Ok(Step::PpfPackage));
}

/// Scenario C: gold PPF without ceramic earns the gold ceramic discount
#[test]
fn test_gold_ppf_without_ceramic_offers_gold_discount() {
    let quote = QuoteState {
        services: vec![ServiceKind::Ppf],
        ppf: PpfConfig::default().with_film_type(FilmType::Clear).with_package(PpfPackage::Gold),
        ..Default::default()
    };

    let offers = analyze(&quote);
    let ceramic = offers
        .iter()
        .find(|o| o.service_to_enable == Some(ServiceKind::Ceramic))
        .expect("ceramic upsell");
    assert_eq!(ceramic.kind, OpportunityKind::Upsell);
    assert_eq!(ceramic.code, CERAMIC_GOLD_CODE);
    assert!(ceramic.title.starts_with("15%"));

    // Rule order is display order
    assert_eq!(offers[0].kind, OpportunityKind::FreeAddon);
}

/// Scenario D: a code applied once is rejected in any casing
#[test]
fn test_duplicate_promo_code_is_rejected() {
    let mut w = wizard();

    w.set_promo_input(FREE_ADDON_CODE);
    assert_eq!(w.apply_promo_input(), Ok(FREE_ADDON_CODE.to_string()));
    assert!(w.promo_input().is_empty());

    w.set_promo_input("freeaddon25");
    assert_eq!(
        w.apply_promo_input(),
        Err(PromoError::AlreadyApplied(FREE_ADDON_CODE.to_string()))
    );
    assert_eq!(w.quote().promo_codes, vec![FREE_ADDON_CODE.to_string()]);
    assert!(w.promo_error().is_some());

    w.set_promo_input("BOGUS");
    assert!(matches!(w.apply_promo_input(), Err(PromoError::Unknown(_))));
    assert_eq!(w.quote().promo_codes.len(), 1);
}

/// Scenario E: one missing contact field gives one error, filling it clears it
#[test]
fn test_incomplete_contact_blocks_until_filled() {
    let mut contact = complete_contact();
    contact.last_name.clear();
    let mut w = wizard_with(&QuoteState {
        services: vec![ServiceKind::Detailing],
        vehicle: complete_vehicle(),
        contact,
        ..Default::default()
    });

    let contact_index = w.steps().iter().position(|s| *s == Step::Contact).unwrap();
    while w.current_index() < contact_index {
        w.next().unwrap();
    }

    assert_eq!(w.next(), Err(ValidationError::Contact));
    assert_eq!(w.current_step(), Step::Contact);
    assert_eq!(
        w.validation_error().map(|e| e.to_string()).as_deref(),
        Some("Please complete all contact fields")
    );

    w.merge(QuotePatch::contact(complete_contact()));
    assert_eq!(w.validation_error(), None);
    assert_eq!(w.next(), Ok(Step::Analysis));
}

#[test]
fn test_selecting_services_grows_graph_in_canonical_order() {
    let mut w = wizard();
    w.toggle_service(ServiceKind::Detailing);
    w.toggle_service(ServiceKind::Ppf);
    w.toggle_service(ServiceKind::Interior);

    assert_eq!(
        w.steps(),
        vec![
            Step::Services,
            Step::PpfType,
            Step::PpfPackage,
            Step::PpfAddons,
            Step::Interior,
            Step::Detailing,
            Step::Vehicle,
            Step::Contact,
            Step::Analysis,
            Step::Review,
        ]
    );
    assert_eq!(w.current_step(), Step::Services);
}

#[test]
fn test_deselecting_service_resets_its_configuration() {
    let mut w = wizard();
    w.toggle_service(ServiceKind::Ppf);
    w.merge(QuotePatch::ppf(PpfConfig::default().with_package(PpfPackage::Silver)));

    w.toggle_service(ServiceKind::Ppf);
    assert_eq!(w.quote().ppf, PpfConfig::default());

    w.toggle_service(ServiceKind::Ppf);
    assert_eq!(w.quote().ppf.package, None);
}

#[test]
fn test_services_merge_resets_dropped_service() {
    let mut w = wizard();
    w.merge(QuotePatch::services(vec![ServiceKind::Ppf]));
    w.merge(QuotePatch::ppf(
        PpfConfig::default().with_film_type(FilmType::Stealth).with_package(PpfPackage::Gold),
    ));

    w.merge(QuotePatch::services(Vec::new()));
    w.merge(QuotePatch::services(vec![ServiceKind::Ppf]));
    assert_eq!(w.quote().ppf, PpfConfig::default());
}

#[test]
fn test_platinum_package_clears_zone_add_ons() {
    let ppf = PpfConfig::default()
        .with_package(PpfPackage::Gold)
        .toggle_zone(shieldquote::models::PpfZone::Mirrors)
        .with_package(PpfPackage::Platinum);
    assert!(ppf.add_ons.is_empty());
}

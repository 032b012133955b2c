// ABOUTME: Promotion analysis engine - turns an in-progress quote into free add-on and upsell offers
//
// Rules run in a fixed order and that order is the display order. The engine is
// a pure function of QuoteState and PromotionRules; applying an offer goes
// through the wizard.

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::models::promo::{
    CERAMIC_GOLD_CODE, CERAMIC_PLATINUM_CODE, CERAMIC_SILVER_CODE, FREE_ADDON_CODE,
    NEW_VEHICLE_CODE, TINT_BUNDLE_CODE,
};
use crate::models::{InteriorOption, PpfConfig, PpfPackage, PpfZone, QuoteState, ServiceKind};

/// Tunables for the offer rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRules {
    /// Model years at or above this count as a new vehicle
    pub new_vehicle_year: u16,
}

impl PromotionRules {
    /// Last year's models and newer count as new
    pub fn current() -> Self {
        let year = u16::try_from(Utc::now().year() - 1).unwrap_or(u16::MAX);
        Self { new_vehicle_year: year }
    }

    /// Run every rule against `state`
    pub fn analyze(&self, state: &QuoteState) -> Vec<Opportunity> {
        [
            free_addon_rule(state),
            ceramic_upsell_rule(state),
            tint_upsell_rule(state, self),
            new_vehicle_interior_rule(state, self),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn is_new_vehicle(&self, state: &QuoteState) -> bool {
        state.vehicle.model_year().is_some_and(|year| year >= self.new_vehicle_year)
    }
}

impl Default for PromotionRules {
    fn default() -> Self {
        Self::current()
    }
}

/// Colour keywords that show swirl marks badly
const DARK_COLOR_KEYWORDS: &[&str] = &[
    "black", "dark", "midnight", "charcoal", "graphite", "obsidian", "navy", "onyx", "jet",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpportunityKind {
    FreeAddon,
    Upsell,
}

/// An offer surfaced on the analysis screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub kind: OpportunityKind,
    pub title: String,
    pub description: String,
    pub reason: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_addons: Option<Vec<PpfZone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_to_enable: Option<ServiceKind>,
}

/// Run every rule against `state` with the current-year rules
pub fn analyze(state: &QuoteState) -> Vec<Opportunity> {
    PromotionRules::current().analyze(state)
}

/// PPF package, when PPF is selected and a package has been picked
fn selected_ppf_package(state: &QuoteState) -> Option<PpfPackage> {
    if state.has_service(ServiceKind::Ppf) {
        state.ppf.package
    } else {
        None
    }
}

fn has_dark_color(state: &QuoteState) -> bool {
    let color = state.vehicle.color.to_ascii_lowercase();
    DARK_COLOR_KEYWORDS.iter().any(|keyword| color.contains(keyword))
}

fn free_addon_rule(state: &QuoteState) -> Option<Opportunity> {
    let package = selected_ppf_package(state)?;
    if !matches!(package, PpfPackage::Bronze | PpfPackage::Silver | PpfPackage::Gold) {
        return None;
    }

    Some(Opportunity {
        kind: OpportunityKind::FreeAddon,
        title: "Free high-wear zone".to_string(),
        description: "Add door cups, door edges or rocker panels to your PPF at no charge"
            .to_string(),
        reason: format!(
            "Your {} package leaves the most chip-prone zones exposed - pick one and we'll cover it free",
            package.label()
        ),
        code: FREE_ADDON_CODE,
        eligible_addons: Some(PpfZone::HIGH_WEAR.to_vec()),
        service_to_enable: None,
    })
}

/// Discount and code for adding ceramic on top of a PPF tier
pub fn ceramic_discount(package: PpfPackage) -> Option<(u8, &'static str)> {
    match package {
        PpfPackage::Silver => Some((10, CERAMIC_SILVER_CODE)),
        PpfPackage::Gold => Some((15, CERAMIC_GOLD_CODE)),
        PpfPackage::Platinum => Some((20, CERAMIC_PLATINUM_CODE)),
        PpfPackage::Bronze | PpfPackage::Track => None,
    }
}

/// Why ceramic suits this vehicle, first matching framing wins
pub fn ceramic_reason(state: &QuoteState, package: PpfPackage) -> String {
    if has_dark_color(state) {
        format!(
            "{} paint shows swirls first - coating the unfilmed panels keeps the whole car looking corrected",
            state.vehicle.color.trim()
        )
    } else if package == PpfPackage::Track {
        "Track days bake brake dust and rubber into the film - a coating stops contamination bonding to it"
            .to_string()
    } else if package == PpfPackage::Platinum {
        "A full wrap deserves a hydrophobic top layer - ceramic over film keeps it self-cleaning for years"
            .to_string()
    } else {
        "Ceramic over fresh film and paint stops road grime adhering, so washes take minutes".to_string()
    }
}

fn ceramic_upsell_rule(state: &QuoteState) -> Option<Opportunity> {
    let package = selected_ppf_package(state)?;
    if state.has_service(ServiceKind::Ceramic) {
        return None;
    }
    let (percent, code) = ceramic_discount(package)?;

    Some(Opportunity {
        kind: OpportunityKind::Upsell,
        title: format!("{percent}% off ceramic coating"),
        description: format!("Bundle a ceramic coating with your {} PPF", package.label()),
        reason: ceramic_reason(state, package),
        code,
        eligible_addons: None,
        service_to_enable: Some(ServiceKind::Ceramic),
    })
}

/// Why tint suits this vehicle, first matching framing wins
pub fn tint_reason(state: &QuoteState, rules: &PromotionRules) -> String {
    if state.has_service(ServiceKind::Interior) && state.interior.contains(&InteriorOption::Leather)
    {
        "UV is what cracks and fades leather - tint blocks 99% of it before it reaches the seats you're protecting"
            .to_string()
    } else if rules.is_new_vehicle(state) {
        "Keep that new interior new - tint stops the dash and trim fading in the first few summers"
            .to_string()
    } else {
        "Tint rejects heat and 99% of UV, protecting you and the cabin while the film protects the paint"
            .to_string()
    }
}

fn tint_upsell_rule(state: &QuoteState, rules: &PromotionRules) -> Option<Opportunity> {
    selected_ppf_package(state)?;
    if state.has_service(ServiceKind::Tint) {
        return None;
    }

    Some(Opportunity {
        kind: OpportunityKind::Upsell,
        title: "10% off window tint".to_string(),
        description: "Add window tint to your PPF booking".to_string(),
        reason: tint_reason(state, rules),
        code: TINT_BUNDLE_CODE,
        eligible_addons: None,
        service_to_enable: Some(ServiceKind::Tint),
    })
}

fn new_vehicle_interior_rule(state: &QuoteState, rules: &PromotionRules) -> Option<Opportunity> {
    if !rules.is_new_vehicle(state)
        || state.has_service(ServiceKind::Interior)
        || state.has_service(ServiceKind::Tint)
    {
        return None;
    }

    Some(Opportunity {
        kind: OpportunityKind::Upsell,
        title: "10% off interior protection".to_string(),
        description: "Protect seats, carpets and trim while they're still spotless".to_string(),
        reason: format!(
            "A {} interior is as clean as it will ever be - sealing it now locks out the first spills and stains",
            state.vehicle.year.trim()
        ),
        code: NEW_VEHICLE_CODE,
        eligible_addons: None,
        service_to_enable: Some(ServiceKind::Interior),
    })
}

/// PPF config with `zone` as the single claimed free zone.
///
/// Only one high-wear zone is free, so claiming another replaces it.
pub fn claim_free_zone(ppf: &PpfConfig, zone: PpfZone) -> PpfConfig {
    let mut ppf = ppf.clone();
    ppf.add_ons.retain(|z| !PpfZone::HIGH_WEAR.contains(z));
    ppf.add_ons.insert(zone);
    ppf
}

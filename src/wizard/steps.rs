// ABOUTME: Step vocabulary and the step graph builder
// The graph is a pure function of QuoteState and is rebuilt after every mutation

use serde::{Deserialize, Serialize};

use crate::models::{FilmType, QuoteState, ServiceKind};

/// One screen of the quote wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Services,
    PpfType,
    PpfColor,
    PpfPackage,
    PpfAddons,
    TintType,
    TintPackage,
    TintAddons,
    CeramicPackage,
    CeramicAddons,
    PaintCorrection,
    Interior,
    Windshield,
    Undercoating,
    Detailing,
    Vehicle,
    Contact,
    Analysis,
    Review,
}

impl Step {
    /// Get display title for this step
    pub fn title(self) -> &'static str {
        match self {
            Self::Services => "Services",
            Self::PpfType => "Film Type",
            Self::PpfColor => "Film Colour",
            Self::PpfPackage => "PPF Package",
            Self::PpfAddons => "PPF Add-ons",
            Self::TintType => "Tint Film",
            Self::TintPackage => "Tint Package",
            Self::TintAddons => "Tint Add-ons",
            Self::CeramicPackage => "Ceramic Package",
            Self::CeramicAddons => "Ceramic Add-ons",
            Self::PaintCorrection => "Paint Correction",
            Self::Interior => "Interior Protection",
            Self::Windshield => "Windshield",
            Self::Undercoating => "Undercoating",
            Self::Detailing => "Detailing",
            Self::Vehicle => "Vehicle",
            Self::Contact => "Contact",
            Self::Analysis => "Offers",
            Self::Review => "Review",
        }
    }

    /// Get description for this step
    pub fn description(self) -> &'static str {
        match self {
            Self::Services => "Which services are you interested in?",
            Self::PpfType => "Choose a film finish",
            Self::PpfColor => "Which colour should the wrap be?",
            Self::PpfPackage => "How much of the vehicle should be covered?",
            Self::PpfAddons => "Protect extra high-impact zones",
            Self::TintType => "Choose a tint film",
            Self::TintPackage => "Which windows should be tinted?",
            Self::TintAddons => "Anything else to tint?",
            Self::CeramicPackage => "Choose a coating package",
            Self::CeramicAddons => "Coat more than the paint",
            Self::PaintCorrection => "How much correction does the paint need?",
            Self::Interior => "What should be protected inside?",
            Self::Windshield => "Windshield extras",
            Self::Undercoating => "Choose an undercoating package",
            Self::Detailing => "Tell us what the vehicle needs",
            Self::Vehicle => "Tell us about your vehicle",
            Self::Contact => "How can we reach you?",
            Self::Analysis => "Offers picked for your build",
            Self::Review => "Check everything before sending",
        }
    }

    /// Last sub-step of an optional service block. Finishing one of these with
    /// vehicle and contact already filled in returns straight to the offers.
    pub fn is_service_ending(self) -> bool {
        matches!(
            self,
            Self::PpfAddons
                | Self::TintAddons
                | Self::CeramicAddons
                | Self::PaintCorrection
                | Self::Interior
                | Self::Windshield
                | Self::Undercoating
                | Self::Detailing
        )
    }
}

/// Steps contributed by one service, in order
pub fn service_steps(service: ServiceKind, state: &QuoteState) -> Vec<Step> {
    match service {
        ServiceKind::Ppf => {
            let mut steps = vec![Step::PpfType];
            if state.ppf.film_type == Some(FilmType::Fashion) {
                steps.push(Step::PpfColor);
            }
            steps.push(Step::PpfPackage);
            steps.push(Step::PpfAddons);
            steps
        }
        ServiceKind::Tint => vec![Step::TintType, Step::TintPackage, Step::TintAddons],
        ServiceKind::Ceramic => vec![Step::CeramicPackage, Step::CeramicAddons],
        ServiceKind::PaintCorrection => vec![Step::PaintCorrection],
        ServiceKind::Interior => vec![Step::Interior],
        ServiceKind::Windshield => vec![Step::Windshield],
        ServiceKind::Undercoating => vec![Step::Undercoating],
        ServiceKind::Detailing => vec![Step::Detailing],
    }
}

/// First configuration screen of a service
pub fn first_step(service: ServiceKind) -> Step {
    match service {
        ServiceKind::Ppf => Step::PpfType,
        ServiceKind::Tint => Step::TintType,
        ServiceKind::Ceramic => Step::CeramicPackage,
        ServiceKind::PaintCorrection => Step::PaintCorrection,
        ServiceKind::Interior => Step::Interior,
        ServiceKind::Windshield => Step::Windshield,
        ServiceKind::Undercoating => Step::Undercoating,
        ServiceKind::Detailing => Step::Detailing,
    }
}

/// Build the ordered step list for a quote
pub fn build_steps(state: &QuoteState) -> Vec<Step> {
    let mut steps = vec![Step::Services];

    for service in ServiceKind::ALL {
        if state.has_service(service) {
            steps.extend(service_steps(service, state));
        }
    }

    steps.extend([Step::Vehicle, Step::Contact, Step::Analysis, Step::Review]);
    steps
}

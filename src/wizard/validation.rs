// ABOUTME: Validation gate - per-step completeness requirements that block forward navigation

use thiserror::Error;

use super::steps::Step;
use crate::models::QuoteState;

/// A missing required selection on the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select at least one service")]
    NoServices,
    #[error("Please choose a film type")]
    FilmType,
    #[error("Please enter the wrap colour")]
    FashionColor,
    #[error("Please choose a PPF package")]
    PpfPackage,
    #[error("Please choose a tint film")]
    TintType,
    #[error("Please choose a tint package")]
    TintPackage,
    #[error("Please choose a ceramic package")]
    CeramicPackage,
    #[error("Please choose a paint correction level")]
    PaintCorrection,
    #[error("Please select at least one interior option")]
    Interior,
    #[error("Please choose an undercoating package")]
    Undercoating,
    #[error("Please enter the vehicle year, make and model")]
    Vehicle,
    #[error("Please complete all contact fields")]
    Contact,
}

/// What a step needs before the wizard may move past it
#[derive(Clone, Copy)]
pub struct Requirement {
    pub error: ValidationError,
    satisfied: fn(&QuoteState) -> bool,
}

impl Requirement {
    const fn new(error: ValidationError, satisfied: fn(&QuoteState) -> bool) -> Self {
        Self { error, satisfied }
    }

    pub fn is_met(&self, state: &QuoteState) -> bool {
        (self.satisfied)(state)
    }
}

impl std::fmt::Debug for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requirement").field("error", &self.error).finish()
    }
}

/// Requirement table. Steps returning `None` are optional.
pub fn requirement(step: Step) -> Option<Requirement> {
    use ValidationError as E;

    let requirement = match step {
        Step::Services => Requirement::new(E::NoServices, |s| !s.services.is_empty()),
        Step::PpfType => Requirement::new(E::FilmType, |s| s.ppf.film_type.is_some()),
        Step::PpfColor => Requirement::new(E::FashionColor, |s| {
            s.ppf.fashion_color.as_deref().is_some_and(|c| !c.trim().is_empty())
        }),
        Step::PpfPackage => Requirement::new(E::PpfPackage, |s| s.ppf.package.is_some()),
        Step::TintType => Requirement::new(E::TintType, |s| s.tint.tint_type.is_some()),
        Step::TintPackage => Requirement::new(E::TintPackage, |s| s.tint.package.is_some()),
        Step::CeramicPackage => {
            Requirement::new(E::CeramicPackage, |s| s.ceramic.package.is_some())
        }
        Step::PaintCorrection => {
            Requirement::new(E::PaintCorrection, |s| s.paint_correction.is_some())
        }
        Step::Interior => Requirement::new(E::Interior, |s| !s.interior.is_empty()),
        Step::Undercoating => Requirement::new(E::Undercoating, |s| s.undercoating.is_some()),
        Step::Vehicle => Requirement::new(E::Vehicle, |s| s.vehicle.is_complete()),
        Step::Contact => Requirement::new(E::Contact, |s| s.contact.is_complete()),
        Step::PpfAddons
        | Step::TintAddons
        | Step::CeramicAddons
        | Step::Windshield
        | Step::Detailing
        | Step::Analysis
        | Step::Review => return None,
    };

    Some(requirement)
}

/// Check whether the wizard may advance past `step`
pub fn validate(step: Step, state: &QuoteState) -> Result<(), ValidationError> {
    match requirement(step) {
        Some(req) if !req.is_met(state) => Err(req.error),
        _ => Ok(()),
    }
}

// ABOUTME: Static promo code registry and code validation

use serde::Serialize;
use thiserror::Error;

/// A code the shop honours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromoCode {
    pub code: &'static str,
    pub description: &'static str,
    pub rules: &'static str,
}

pub const FREE_ADDON_CODE: &str = "FREEADDON25";
pub const CERAMIC_SILVER_CODE: &str = "PPFCERAMIC10";
pub const CERAMIC_GOLD_CODE: &str = "PPFCERAMIC15";
pub const CERAMIC_PLATINUM_CODE: &str = "PPFCERAMIC20";
pub const TINT_BUNDLE_CODE: &str = "PPFTINT10";
pub const NEW_VEHICLE_CODE: &str = "NEWCAR10";

/// Every code accepted by the quote form
pub const PROMO_REGISTRY: &[PromoCode] = &[
    PromoCode {
        code: FREE_ADDON_CODE,
        description: "One free high-wear PPF zone",
        rules: "PPF Bronze, Silver or Gold package; one of door cups, door edges or rocker panels",
    },
    PromoCode {
        code: CERAMIC_SILVER_CODE,
        description: "10% off ceramic coating",
        rules: "Ceramic coating booked with a Silver PPF package",
    },
    PromoCode {
        code: CERAMIC_GOLD_CODE,
        description: "15% off ceramic coating",
        rules: "Ceramic coating booked with a Gold PPF package",
    },
    PromoCode {
        code: CERAMIC_PLATINUM_CODE,
        description: "20% off ceramic coating",
        rules: "Ceramic coating booked with a Platinum PPF package",
    },
    PromoCode {
        code: TINT_BUNDLE_CODE,
        description: "10% off window tint",
        rules: "Window tint booked together with any PPF package",
    },
    PromoCode {
        code: NEW_VEHICLE_CODE,
        description: "10% off interior protection",
        rules: "Current model-year vehicles",
    },
];

/// Why a promo code was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoError {
    #[error("Enter a promo code")]
    Empty,

    #[error("Promo code {0} is not valid")]
    Unknown(String),

    #[error("Promo code {0} has already been applied")]
    AlreadyApplied(String),
}

/// Trim and upper-case user input
pub fn normalize_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

/// Look up a code, case-insensitively
pub fn find_promo(code: &str) -> Option<&'static PromoCode> {
    let normalized = normalize_code(code);
    PROMO_REGISTRY.iter().find(|p| p.code == normalized)
}

/// Validate `input` against the registry and the codes already applied.
/// Returns the normalized code on success.
pub fn check_promo(input: &str, applied: &[String]) -> Result<String, PromoError> {
    let code = normalize_code(input);
    if code.is_empty() {
        return Err(PromoError::Empty);
    }
    if find_promo(&code).is_none() {
        return Err(PromoError::Unknown(code));
    }
    if applied.iter().any(|c| c.eq_ignore_ascii_case(&code)) {
        return Err(PromoError::AlreadyApplied(code));
    }
    Ok(code)
}

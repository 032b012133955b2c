// ABOUTME: Core data models for the quote configurator - catalog vocabularies, quote state, promo registry

pub mod catalog;
pub mod promo;
pub mod quote;
pub mod vehicle;

pub use catalog::{
    CeramicAddon, CeramicPackage, ContactMethod, FilmType, InteriorOption, PaintCorrection,
    PpfPackage, PpfZone, ServiceKind, TintAddon, TintPackage, TintType, Undercoating,
    WindshieldAddon,
};
pub use promo::{PromoCode, PromoError, PROMO_REGISTRY};
pub use quote::{
    CeramicConfig, ContactInfo, PpfConfig, QuotePatch, QuoteState, TintConfig, VehicleInfo,
    WindshieldConfig,
};

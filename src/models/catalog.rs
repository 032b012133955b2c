// ABOUTME: Service catalog vocabularies - stable tags for every selectable option
// Display labels live next to each tag so wizard logic never matches on display text

use serde::{Deserialize, Serialize};

/// Services offered by the shop, declared in canonical wizard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceKind {
    Ppf,
    Tint,
    Ceramic,
    PaintCorrection,
    Interior,
    Windshield,
    Undercoating,
    Detailing,
}

impl ServiceKind {
    /// All services in canonical order. Step numbering depends on this order.
    pub const ALL: [Self; 8] = [
        Self::Ppf,
        Self::Tint,
        Self::Ceramic,
        Self::PaintCorrection,
        Self::Interior,
        Self::Windshield,
        Self::Undercoating,
        Self::Detailing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ppf => "Paint Protection Film",
            Self::Tint => "Window Tint",
            Self::Ceramic => "Ceramic Coating",
            Self::PaintCorrection => "Paint Correction",
            Self::Interior => "Interior Protection",
            Self::Windshield => "Windshield Protection",
            Self::Undercoating => "Undercoating",
            Self::Detailing => "Detailing",
        }
    }

    /// Position in the canonical order
    pub fn rank(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(Self::ALL.len())
    }
}

/// PPF finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilmType {
    /// Clear gloss
    Clear,
    /// Matte / satin
    Stealth,
    /// Colour-change film
    Fashion,
}

impl FilmType {
    pub const ALL: [Self; 3] = [Self::Clear, Self::Stealth, Self::Fashion];

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear (gloss)",
            Self::Stealth => "Stealth (matte / satin)",
            Self::Fashion => "Fashion (colour change)",
        }
    }

    /// Packages a film type can be ordered in.
    ///
    /// Colour-change film needs a full wrap; stealth is only cut for full-front
    /// and full-wrap kits.
    pub fn allowed_packages(self) -> &'static [PpfPackage] {
        match self {
            Self::Clear => &PpfPackage::ALL,
            Self::Stealth => &[PpfPackage::Gold, PpfPackage::Platinum],
            Self::Fashion => &[PpfPackage::Platinum],
        }
    }

    pub fn allows(self, package: PpfPackage) -> bool {
        self.allowed_packages().contains(&package)
    }
}

/// PPF coverage tiers, smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PpfPackage {
    /// Entry: partial front
    Bronze,
    /// Mid: full bumper with partial hood and fenders
    Silver,
    /// Full front
    Gold,
    /// Track pack
    Track,
    /// Full wrap
    Platinum,
}

impl PpfPackage {
    pub const ALL: [Self; 5] = [
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Track,
        Self::Platinum,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze - Partial Front",
            Self::Silver => "Silver - Full Bumper, Partial Hood & Fenders",
            Self::Gold => "Gold - Full Front",
            Self::Track => "Track Pack",
            Self::Platinum => "Platinum - Full Wrap",
        }
    }

    /// Full wrap already covers every zone
    pub fn covers_everything(self) -> bool {
        self == Self::Platinum
    }
}

/// Individually protectable vehicle zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PpfZone {
    DoorCups,
    DoorEdges,
    RockerPanels,
    APillars,
    Roofline,
    Headlights,
    Mirrors,
    RearBumperLedge,
}

impl PpfZone {
    pub const ALL: [Self; 8] = [
        Self::DoorCups,
        Self::DoorEdges,
        Self::RockerPanels,
        Self::APillars,
        Self::Roofline,
        Self::Headlights,
        Self::Mirrors,
        Self::RearBumperLedge,
    ];

    /// High-wear zones eligible for the free add-on promotion
    pub const HIGH_WEAR: [Self; 3] = [Self::DoorCups, Self::DoorEdges, Self::RockerPanels];

    pub fn label(self) -> &'static str {
        match self {
            Self::DoorCups => "Door Cups",
            Self::DoorEdges => "Door Edges",
            Self::RockerPanels => "Rocker Panels",
            Self::APillars => "A-Pillars",
            Self::Roofline => "Roofline",
            Self::Headlights => "Headlights",
            Self::Mirrors => "Mirrors",
            Self::RearBumperLedge => "Rear Bumper Ledge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TintType {
    ColorStable,
    NanoCeramic,
}

impl TintType {
    pub const ALL: [Self; 2] = [Self::ColorStable, Self::NanoCeramic];

    pub fn label(self) -> &'static str {
        match self {
            Self::ColorStable => "Color Stable",
            Self::NanoCeramic => "Nano Ceramic",
        }
    }
}

/// Tint tiers by window count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TintPackage {
    FrontSides,
    AllSides,
    SidesAndRear,
    FullVehicle,
}

impl TintPackage {
    pub const ALL: [Self; 4] = [
        Self::FrontSides,
        Self::AllSides,
        Self::SidesAndRear,
        Self::FullVehicle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FrontSides => "Front Two Windows",
            Self::AllSides => "All Side Windows",
            Self::SidesAndRear => "Sides + Rear Glass",
            Self::FullVehicle => "Full Vehicle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TintAddon {
    Sunroof,
    WindshieldBrow,
    FullWindshield,
}

impl TintAddon {
    pub const ALL: [Self; 3] = [Self::Sunroof, Self::WindshieldBrow, Self::FullWindshield];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sunroof => "Sunroof",
            Self::WindshieldBrow => "Windshield Brow Strip",
            Self::FullWindshield => "Full Windshield (clear heat rejection)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CeramicPackage {
    Essential,
    Enhanced,
    Ultimate,
}

impl CeramicPackage {
    pub const ALL: [Self; 3] = [Self::Essential, Self::Enhanced, Self::Ultimate];

    pub fn label(self) -> &'static str {
        match self {
            Self::Essential => "Essential - 2 Year",
            Self::Enhanced => "Enhanced - 5 Year",
            Self::Ultimate => "Ultimate - 9 Year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CeramicAddon {
    Wheels,
    Glass,
    Trim,
    Calipers,
}

impl CeramicAddon {
    pub const ALL: [Self; 4] = [Self::Wheels, Self::Glass, Self::Trim, Self::Calipers];

    pub fn label(self) -> &'static str {
        match self {
            Self::Wheels => "Wheel Faces & Barrels",
            Self::Glass => "Glass",
            Self::Trim => "Plastic Trim",
            Self::Calipers => "Brake Calipers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaintCorrection {
    OneStep,
    TwoStep,
    ThreeStep,
}

impl PaintCorrection {
    pub const ALL: [Self; 3] = [Self::OneStep, Self::TwoStep, Self::ThreeStep];

    pub fn label(self) -> &'static str {
        match self {
            Self::OneStep => "One-Step Enhancement",
            Self::TwoStep => "Two-Step Correction",
            Self::ThreeStep => "Three-Step Concours Correction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InteriorOption {
    Leather,
    Fabric,
    Carpet,
    Plastics,
}

impl InteriorOption {
    pub const ALL: [Self; 4] = [Self::Leather, Self::Fabric, Self::Carpet, Self::Plastics];

    pub fn label(self) -> &'static str {
        match self {
            Self::Leather => "Leather Seats",
            Self::Fabric => "Fabric Seats",
            Self::Carpet => "Carpets & Mats",
            Self::Plastics => "Dash & Plastics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindshieldAddon {
    ProtectionFilm,
    RainRepellent,
    ChipRepair,
}

impl WindshieldAddon {
    pub const ALL: [Self; 3] = [Self::ProtectionFilm, Self::RainRepellent, Self::ChipRepair];

    pub fn label(self) -> &'static str {
        match self {
            Self::ProtectionFilm => "Windshield Protection Film",
            Self::RainRepellent => "Rain Repellent Coating",
            Self::ChipRepair => "Chip Repair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Undercoating {
    Rubberized,
    OilBased,
    Combination,
}

impl Undercoating {
    pub const ALL: [Self; 3] = [Self::Rubberized, Self::OilBased, Self::Combination];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rubberized => "Rubberized Undercoating",
            Self::OilBased => "Oil-Based Rust Protection",
            Self::Combination => "Combination Package",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactMethod {
    #[default]
    Text,
    Call,
    Email,
}

impl ContactMethod {
    pub const ALL: [Self; 3] = [Self::Text, Self::Call, Self::Email];

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Call => "Call",
            Self::Email => "Email",
        }
    }

    /// Next method in display order, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            Self::Text => Self::Call,
            Self::Call => Self::Email,
            Self::Email => Self::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_rank_follows_canonical_order() {
        assert_eq!(ServiceKind::Ppf.rank(), 0);
        assert_eq!(ServiceKind::Ceramic.rank(), 2);
        assert_eq!(ServiceKind::Detailing.rank(), 7);
    }

    #[test]
    fn test_film_package_compatibility() {
        assert!(FilmType::Clear.allows(PpfPackage::Bronze));
        assert!(FilmType::Stealth.allows(PpfPackage::Gold));
        assert!(!FilmType::Stealth.allows(PpfPackage::Silver));
        assert_eq!(FilmType::Fashion.allowed_packages(), &[PpfPackage::Platinum]);
    }

    #[test]
    fn test_tags_serialize_independently_of_labels() {
        let json = serde_json::to_string(&PpfPackage::Gold).unwrap();
        assert_eq!(json, "\"Gold\"");
        assert_ne!(PpfPackage::Gold.label(), "Gold");
    }

    #[test]
    fn test_contact_method_cycle() {
        assert_eq!(ContactMethod::Text.cycle(), ContactMethod::Call);
        assert_eq!(ContactMethod::Email.cycle(), ContactMethod::Text);
    }
}

// ABOUTME: QuoteState aggregate - the full in-progress quote configuration
// Serialized verbatim (camelCase keys) for session persistence and lead submission

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::catalog::{
    CeramicAddon, CeramicPackage, ContactMethod, FilmType, InteriorOption, PaintCorrection,
    PpfPackage, PpfZone, ServiceKind, TintAddon, TintPackage, TintType, Undercoating,
    WindshieldAddon,
};

/// Paint protection film configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfConfig {
    #[serde(default)]
    pub film_type: Option<FilmType>,
    #[serde(default)]
    pub package: Option<PpfPackage>,
    #[serde(default)]
    pub add_ons: BTreeSet<PpfZone>,
    #[serde(default)]
    pub fashion_color: Option<String>,
    #[serde(default)]
    pub is_fusion: bool,
}

impl PpfConfig {
    /// Change film type, dropping a package the new film cannot be cut in
    pub fn with_film_type(mut self, film_type: FilmType) -> Self {
        self.film_type = Some(film_type);
        if let Some(package) = self.package {
            if !film_type.allows(package) {
                self.package = None;
            }
        }
        if film_type != FilmType::Fashion {
            self.fashion_color = None;
        }
        self
    }

    /// Change package; a full wrap leaves nothing to add
    pub fn with_package(mut self, package: PpfPackage) -> Self {
        self.package = Some(package);
        if package.covers_everything() {
            self.add_ons.clear();
        }
        self
    }

    /// Toggle an add-on zone. Ignored when the package already covers everything.
    pub fn toggle_zone(mut self, zone: PpfZone) -> Self {
        if self.package.is_some_and(PpfPackage::covers_everything) {
            return self;
        }
        if !self.add_ons.remove(&zone) {
            self.add_ons.insert(zone);
        }
        self
    }
}

/// Window tint configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TintConfig {
    #[serde(default, rename = "type")]
    pub tint_type: Option<TintType>,
    #[serde(default)]
    pub package: Option<TintPackage>,
    #[serde(default)]
    pub add_ons: BTreeSet<TintAddon>,
}

/// Ceramic coating configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeramicConfig {
    #[serde(default)]
    pub package: Option<CeramicPackage>,
    #[serde(default)]
    pub add_ons: BTreeSet<CeramicAddon>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindshieldConfig {
    #[serde(default)]
    pub add_ons: BTreeSet<WindshieldAddon>,
}

/// Vehicle attributes as typed by the customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub timing: String,
}

impl VehicleInfo {
    /// Year, make and model are all filled in
    pub fn is_complete(&self) -> bool {
        !self.year.trim().is_empty()
            && !self.make.trim().is_empty()
            && !self.model.trim().is_empty()
    }

    /// Model year when the year field holds a number
    pub fn model_year(&self) -> Option<u16> {
        self.year.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub method: ContactMethod,
}

impl ContactInfo {
    pub fn is_complete(&self) -> bool {
        [&self.first_name, &self.last_name, &self.phone, &self.email]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// The whole quote being configured
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteState {
    /// Selected services, unique, in selection order
    #[serde(default)]
    pub services: Vec<ServiceKind>,
    #[serde(default)]
    pub ppf: PpfConfig,
    #[serde(default)]
    pub tint: TintConfig,
    #[serde(default)]
    pub ceramic: CeramicConfig,
    #[serde(default)]
    pub paint_correction: Option<PaintCorrection>,
    #[serde(default)]
    pub interior: BTreeSet<InteriorOption>,
    #[serde(default)]
    pub windshield: WindshieldConfig,
    #[serde(default)]
    pub undercoating: Option<Undercoating>,
    #[serde(default)]
    pub detailing_notes: String,
    #[serde(default)]
    pub vehicle: VehicleInfo,
    #[serde(default)]
    pub contact: ContactInfo,
    /// Applied promo codes, upper-case, in application order
    #[serde(default)]
    pub promo_codes: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl QuoteState {
    pub fn has_service(&self, service: ServiceKind) -> bool {
        self.services.contains(&service)
    }

    pub fn has_promo(&self, code: &str) -> bool {
        self.promo_codes.iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    /// Services in canonical order, independent of selection order
    pub fn services_in_order(&self) -> Vec<ServiceKind> {
        let mut services = self.services.clone();
        services.sort_by_key(|s| s.rank());
        services
    }

    /// Vehicle and contact details are both filled in
    pub fn details_complete(&self) -> bool {
        self.vehicle.is_complete() && self.contact.is_complete()
    }

    /// Put `service`'s configuration block back to its defaults
    pub fn reset_service_block(&mut self, service: ServiceKind) {
        match service {
            ServiceKind::Ppf => self.ppf = PpfConfig::default(),
            ServiceKind::Tint => self.tint = TintConfig::default(),
            ServiceKind::Ceramic => self.ceramic = CeramicConfig::default(),
            ServiceKind::PaintCorrection => self.paint_correction = None,
            ServiceKind::Interior => self.interior.clear(),
            ServiceKind::Windshield => self.windshield = WindshieldConfig::default(),
            ServiceKind::Undercoating => self.undercoating = None,
            ServiceKind::Detailing => self.detailing_notes.clear(),
        }
    }

    /// Human-readable summary for the review screen and CLI output
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for service in self.services_in_order() {
            let detail = match service {
                ServiceKind::Ppf => {
                    let mut parts = Vec::new();
                    if let Some(film) = self.ppf.film_type {
                        parts.push(film.label().to_string());
                    }
                    if let Some(color) = self.ppf.fashion_color.as_deref() {
                        parts.push(format!("colour {color}"));
                    }
                    if let Some(package) = self.ppf.package {
                        parts.push(package.label().to_string());
                    }
                    if !self.ppf.add_ons.is_empty() {
                        parts.push(format!("+ {}", join_labels(self.ppf.add_ons.iter().map(|z| z.label()))));
                    }
                    if self.ppf.is_fusion {
                        parts.push("Fusion".to_string());
                    }
                    parts.join(", ")
                }
                ServiceKind::Tint => {
                    let mut parts = Vec::new();
                    if let Some(tint_type) = self.tint.tint_type {
                        parts.push(tint_type.label().to_string());
                    }
                    if let Some(package) = self.tint.package {
                        parts.push(package.label().to_string());
                    }
                    if !self.tint.add_ons.is_empty() {
                        parts.push(format!("+ {}", join_labels(self.tint.add_ons.iter().map(|a| a.label()))));
                    }
                    parts.join(", ")
                }
                ServiceKind::Ceramic => {
                    let mut parts = Vec::new();
                    if let Some(package) = self.ceramic.package {
                        parts.push(package.label().to_string());
                    }
                    if !self.ceramic.add_ons.is_empty() {
                        parts.push(format!("+ {}", join_labels(self.ceramic.add_ons.iter().map(|a| a.label()))));
                    }
                    parts.join(", ")
                }
                ServiceKind::PaintCorrection => self
                    .paint_correction
                    .map(|p| p.label().to_string())
                    .unwrap_or_default(),
                ServiceKind::Interior => join_labels(self.interior.iter().map(|o| o.label())),
                ServiceKind::Windshield => {
                    join_labels(self.windshield.add_ons.iter().map(|a| a.label()))
                }
                ServiceKind::Undercoating => self
                    .undercoating
                    .map(|u| u.label().to_string())
                    .unwrap_or_default(),
                ServiceKind::Detailing => self.detailing_notes.trim().to_string(),
            };

            if detail.is_empty() {
                lines.push(service.label().to_string());
            } else {
                lines.push(format!("{}: {}", service.label(), detail));
            }
        }

        let vehicle = [&self.vehicle.year, &self.vehicle.make, &self.vehicle.model]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !vehicle.is_empty() {
            let color = self.vehicle.color.trim();
            if color.is_empty() {
                lines.push(format!("Vehicle: {vehicle}"));
            } else {
                lines.push(format!("Vehicle: {vehicle} ({color})"));
            }
        }

        if self.contact.is_complete() {
            lines.push(format!(
                "Contact: {} {} via {}",
                self.contact.first_name.trim(),
                self.contact.last_name.trim(),
                self.contact.method.label()
            ));
        }

        if !self.promo_codes.is_empty() {
            lines.push(format!("Promo codes: {}", self.promo_codes.join(", ")));
        }

        lines
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// Partial update of top-level quote keys.
///
/// Nested blocks are replaced wholesale, so a caller changing one PPF field
/// must pass the full `PpfConfig`.
#[derive(Debug, Clone, Default)]
pub struct QuotePatch {
    pub services: Option<Vec<ServiceKind>>,
    pub ppf: Option<PpfConfig>,
    pub tint: Option<TintConfig>,
    pub ceramic: Option<CeramicConfig>,
    pub paint_correction: Option<Option<PaintCorrection>>,
    pub interior: Option<BTreeSet<InteriorOption>>,
    pub windshield: Option<WindshieldConfig>,
    pub undercoating: Option<Option<Undercoating>>,
    pub detailing_notes: Option<String>,
    pub vehicle: Option<VehicleInfo>,
    pub contact: Option<ContactInfo>,
    pub promo_codes: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl QuotePatch {
    pub fn services(services: Vec<ServiceKind>) -> Self {
        Self { services: Some(services), ..Default::default() }
    }

    pub fn ppf(ppf: PpfConfig) -> Self {
        Self { ppf: Some(ppf), ..Default::default() }
    }

    pub fn tint(tint: TintConfig) -> Self {
        Self { tint: Some(tint), ..Default::default() }
    }

    pub fn ceramic(ceramic: CeramicConfig) -> Self {
        Self { ceramic: Some(ceramic), ..Default::default() }
    }

    pub fn vehicle(vehicle: VehicleInfo) -> Self {
        Self { vehicle: Some(vehicle), ..Default::default() }
    }

    pub fn contact(contact: ContactInfo) -> Self {
        Self { contact: Some(contact), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_none()
            && self.ppf.is_none()
            && self.tint.is_none()
            && self.ceramic.is_none()
            && self.paint_correction.is_none()
            && self.interior.is_none()
            && self.windshield.is_none()
            && self.undercoating.is_none()
            && self.detailing_notes.is_none()
            && self.vehicle.is_none()
            && self.contact.is_none()
            && self.promo_codes.is_none()
            && self.notes.is_none()
    }

    /// Apply every present key onto `state`.
    ///
    /// Services dropped from the list get their block reset before any block
    /// in the same patch is applied.
    pub fn apply_to(self, state: &mut QuoteState) {
        if let Some(mut services) = self.services {
            let mut seen = Vec::with_capacity(services.len());
            services.retain(|s| {
                if seen.contains(s) {
                    false
                } else {
                    seen.push(*s);
                    true
                }
            });
            let dropped: Vec<ServiceKind> =
                state.services.iter().copied().filter(|s| !services.contains(s)).collect();
            for service in dropped {
                state.reset_service_block(service);
            }
            state.services = services;
        }
        if let Some(ppf) = self.ppf {
            state.ppf = ppf;
        }
        if let Some(tint) = self.tint {
            state.tint = tint;
        }
        if let Some(ceramic) = self.ceramic {
            state.ceramic = ceramic;
        }
        if let Some(paint_correction) = self.paint_correction {
            state.paint_correction = paint_correction;
        }
        if let Some(interior) = self.interior {
            state.interior = interior;
        }
        if let Some(windshield) = self.windshield {
            state.windshield = windshield;
        }
        if let Some(undercoating) = self.undercoating {
            state.undercoating = undercoating;
        }
        if let Some(notes) = self.detailing_notes {
            state.detailing_notes = notes;
        }
        if let Some(vehicle) = self.vehicle {
            state.vehicle = vehicle;
        }
        if let Some(contact) = self.contact {
            state.contact = contact;
        }
        if let Some(codes) = self.promo_codes {
            state.promo_codes = codes;
        }
        if let Some(notes) = self.notes {
            state.notes = notes;
        }
    }
}

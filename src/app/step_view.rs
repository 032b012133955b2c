// ABOUTME: Per-step selectable rows for the terminal front-end
// Maps the current wizard step onto choice, toggle, text field and action rows

use std::collections::BTreeSet;

use crate::models::vehicle::{models_for, suggest_makes};
use crate::models::{
    CeramicAddon, CeramicPackage, FilmType, InteriorOption, PaintCorrection, PpfPackage, PpfZone,
    QuotePatch, QuoteState, ServiceKind, TintAddon, TintPackage, TintType, Undercoating,
    WindshieldAddon,
};
use crate::wizard::{OpportunityKind, QuoteWizard, Step};

/// Editable text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FashionColor,
    DetailingNotes,
    VehicleYear,
    VehicleMake,
    VehicleModel,
    VehicleSize,
    VehicleColor,
    VehicleTiming,
    FirstName,
    LastName,
    Phone,
    Email,
    PromoCode,
    Notes,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::FashionColor => "Colour",
            Self::DetailingNotes => "Notes",
            Self::VehicleYear => "Year",
            Self::VehicleMake => "Make",
            Self::VehicleModel => "Model",
            Self::VehicleSize => "Size",
            Self::VehicleColor => "Colour",
            Self::VehicleTiming => "When",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::PromoCode => "Promo code",
            Self::Notes => "Notes",
        }
    }

    /// Reject characters the field cannot hold
    pub fn accepts(self, current: &str, c: char) -> bool {
        match self {
            Self::VehicleYear => c.is_ascii_digit() && current.len() < 4,
            Self::PromoCode => c.is_ascii_alphanumeric(),
            _ => !c.is_control(),
        }
    }
}

/// What activating a row does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    ToggleService(ServiceKind),
    SetFilmType(FilmType),
    ToggleFusion,
    SetPpfPackage(PpfPackage),
    TogglePpfZone(PpfZone),
    SetTintType(TintType),
    SetTintPackage(TintPackage),
    ToggleTintAddon(TintAddon),
    SetCeramicPackage(CeramicPackage),
    ToggleCeramicAddon(CeramicAddon),
    SetPaintCorrection(PaintCorrection),
    ToggleInterior(InteriorOption),
    ToggleWindshieldAddon(WindshieldAddon),
    SetUndercoating(Undercoating),
    CycleContactMethod,
    Edit(Field),
    ClaimFreeAddon(PpfZone),
    AcceptUpsell(usize),
    ContinueFromOffers,
    RemovePromo(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Single choice; `true` when it is the current selection
    Choice(bool),
    /// Multi-select; `true` when checked
    Toggle(bool),
    /// Text input holding its current value
    Field(String),
    /// Button
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub kind: RowKind,
    pub action: RowAction,
}

impl Row {
    fn choice(label: impl Into<String>, selected: bool, action: RowAction) -> Self {
        Self { label: label.into(), kind: RowKind::Choice(selected), action }
    }

    fn toggle(label: impl Into<String>, checked: bool, action: RowAction) -> Self {
        Self { label: label.into(), kind: RowKind::Toggle(checked), action }
    }

    fn field(field: Field, value: String) -> Self {
        Self { label: field.label().to_string(), kind: RowKind::Field(value), action: RowAction::Edit(field) }
    }

    fn action(label: impl Into<String>, action: RowAction) -> Self {
        Self { label: label.into(), kind: RowKind::Action, action }
    }

    pub fn field_kind(&self) -> Option<Field> {
        match self.action {
            RowAction::Edit(field) => Some(field),
            _ => None,
        }
    }
}

/// Rows for the wizard's current step
pub fn rows(wizard: &QuoteWizard) -> Vec<Row> {
    let quote = wizard.quote();

    match wizard.current_step() {
        Step::Services => ServiceKind::ALL
            .iter()
            .map(|s| Row::toggle(s.label(), quote.has_service(*s), RowAction::ToggleService(*s)))
            .collect(),
        Step::PpfType => {
            let mut rows: Vec<Row> = FilmType::ALL
                .iter()
                .map(|f| Row::choice(f.label(), quote.ppf.film_type == Some(*f), RowAction::SetFilmType(*f)))
                .collect();
            rows.push(Row::toggle("Fusion ceramic top coat", quote.ppf.is_fusion, RowAction::ToggleFusion));
            rows
        }
        Step::PpfColor => vec![Row::field(Field::FashionColor, field_value(wizard, Field::FashionColor))],
        Step::PpfPackage => {
            let packages = quote.ppf.film_type.map_or(&PpfPackage::ALL[..], FilmType::allowed_packages);
            packages
                .iter()
                .map(|p| Row::choice(p.label(), quote.ppf.package == Some(*p), RowAction::SetPpfPackage(*p)))
                .collect()
        }
        Step::PpfAddons => {
            if quote.ppf.package.is_some_and(PpfPackage::covers_everything) {
                return Vec::new();
            }
            PpfZone::ALL
                .iter()
                .map(|z| Row::toggle(z.label(), quote.ppf.add_ons.contains(z), RowAction::TogglePpfZone(*z)))
                .collect()
        }
        Step::TintType => TintType::ALL
            .iter()
            .map(|t| Row::choice(t.label(), quote.tint.tint_type == Some(*t), RowAction::SetTintType(*t)))
            .collect(),
        Step::TintPackage => TintPackage::ALL
            .iter()
            .map(|p| Row::choice(p.label(), quote.tint.package == Some(*p), RowAction::SetTintPackage(*p)))
            .collect(),
        Step::TintAddons => TintAddon::ALL
            .iter()
            .map(|a| Row::toggle(a.label(), quote.tint.add_ons.contains(a), RowAction::ToggleTintAddon(*a)))
            .collect(),
        Step::CeramicPackage => CeramicPackage::ALL
            .iter()
            .map(|p| Row::choice(p.label(), quote.ceramic.package == Some(*p), RowAction::SetCeramicPackage(*p)))
            .collect(),
        Step::CeramicAddons => CeramicAddon::ALL
            .iter()
            .map(|a| Row::toggle(a.label(), quote.ceramic.add_ons.contains(a), RowAction::ToggleCeramicAddon(*a)))
            .collect(),
        Step::PaintCorrection => PaintCorrection::ALL
            .iter()
            .map(|p| Row::choice(p.label(), quote.paint_correction == Some(*p), RowAction::SetPaintCorrection(*p)))
            .collect(),
        Step::Interior => InteriorOption::ALL
            .iter()
            .map(|o| Row::toggle(o.label(), quote.interior.contains(o), RowAction::ToggleInterior(*o)))
            .collect(),
        Step::Windshield => WindshieldAddon::ALL
            .iter()
            .map(|a| {
                Row::toggle(a.label(), quote.windshield.add_ons.contains(a), RowAction::ToggleWindshieldAddon(*a))
            })
            .collect(),
        Step::Undercoating => Undercoating::ALL
            .iter()
            .map(|u| Row::choice(u.label(), quote.undercoating == Some(*u), RowAction::SetUndercoating(*u)))
            .collect(),
        Step::Detailing => vec![Row::field(Field::DetailingNotes, field_value(wizard, Field::DetailingNotes))],
        Step::Vehicle => [
            Field::VehicleYear,
            Field::VehicleMake,
            Field::VehicleModel,
            Field::VehicleSize,
            Field::VehicleColor,
            Field::VehicleTiming,
        ]
        .into_iter()
        .map(|f| Row::field(f, field_value(wizard, f)))
        .collect(),
        Step::Contact => {
            let mut rows: Vec<Row> = [Field::FirstName, Field::LastName, Field::Phone, Field::Email]
                .into_iter()
                .map(|f| Row::field(f, field_value(wizard, f)))
                .collect();
            rows.push(Row::action(
                format!("Preferred contact: {}", quote.contact.method.label()),
                RowAction::CycleContactMethod,
            ));
            rows
        }
        Step::Analysis => offer_rows(wizard),
        Step::Review => {
            let mut rows = vec![Row::field(Field::PromoCode, field_value(wizard, Field::PromoCode))];
            rows.extend(
                quote
                    .promo_codes
                    .iter()
                    .map(|code| Row::action(format!("Remove {code}"), RowAction::RemovePromo(code.clone()))),
            );
            rows.push(Row::field(Field::Notes, field_value(wizard, Field::Notes)));
            rows.push(Row::action("Submit quote request", RowAction::Submit));
            rows
        }
    }
}

/// Offer rows; empty while analysis is pending or when nothing applies
fn offer_rows(wizard: &QuoteWizard) -> Vec<Row> {
    let Some(offers) = wizard.opportunities() else {
        return Vec::new();
    };
    if offers.is_empty() {
        return Vec::new();
    }

    let claimed = wizard.claimed_free_zone();
    let mut rows = Vec::new();
    for (index, offer) in offers.iter().enumerate() {
        match offer.kind {
            OpportunityKind::FreeAddon => {
                for zone in offer.eligible_addons.iter().flatten() {
                    rows.push(Row::choice(
                        format!("Free {}", zone.label()),
                        claimed == Some(*zone),
                        RowAction::ClaimFreeAddon(*zone),
                    ));
                }
            }
            OpportunityKind::Upsell => {
                let label = match offer.service_to_enable {
                    Some(service) => format!("Add {} ({})", service.label(), offer.code),
                    None => offer.title.clone(),
                };
                rows.push(Row::action(label, RowAction::AcceptUpsell(index)));
            }
        }
    }
    rows.push(Row::action("Continue to review", RowAction::ContinueFromOffers));
    rows
}

/// Current text of a field
pub fn field_value(wizard: &QuoteWizard, field: Field) -> String {
    let quote = wizard.quote();
    match field {
        Field::FashionColor => quote.ppf.fashion_color.clone().unwrap_or_default(),
        Field::DetailingNotes => quote.detailing_notes.clone(),
        Field::VehicleYear => quote.vehicle.year.clone(),
        Field::VehicleMake => quote.vehicle.make.clone(),
        Field::VehicleModel => quote.vehicle.model.clone(),
        Field::VehicleSize => quote.vehicle.size.clone(),
        Field::VehicleColor => quote.vehicle.color.clone(),
        Field::VehicleTiming => quote.vehicle.timing.clone(),
        Field::FirstName => quote.contact.first_name.clone(),
        Field::LastName => quote.contact.last_name.clone(),
        Field::Phone => quote.contact.phone.clone(),
        Field::Email => quote.contact.email.clone(),
        Field::PromoCode => wizard.promo_input().to_string(),
        Field::Notes => quote.notes.clone(),
    }
}

/// Patch writing `value` into a quote field. The promo input is wizard state, not quote state.
pub fn field_patch(quote: &QuoteState, field: Field, value: String) -> Option<QuotePatch> {
    let mut vehicle = quote.vehicle.clone();
    let mut contact = quote.contact.clone();

    let patch = match field {
        Field::FashionColor => {
            let mut ppf = quote.ppf.clone();
            ppf.fashion_color = (!value.is_empty()).then_some(value);
            QuotePatch::ppf(ppf)
        }
        Field::DetailingNotes => QuotePatch { detailing_notes: Some(value), ..Default::default() },
        Field::Notes => QuotePatch { notes: Some(value), ..Default::default() },
        Field::VehicleYear | Field::VehicleMake | Field::VehicleModel | Field::VehicleSize
        | Field::VehicleColor | Field::VehicleTiming => {
            let slot = match field {
                Field::VehicleYear => &mut vehicle.year,
                Field::VehicleMake => &mut vehicle.make,
                Field::VehicleModel => &mut vehicle.model,
                Field::VehicleSize => &mut vehicle.size,
                Field::VehicleColor => &mut vehicle.color,
                _ => &mut vehicle.timing,
            };
            *slot = value;
            QuotePatch::vehicle(vehicle)
        }
        Field::FirstName | Field::LastName | Field::Phone | Field::Email => {
            let slot = match field {
                Field::FirstName => &mut contact.first_name,
                Field::LastName => &mut contact.last_name,
                Field::Phone => &mut contact.phone,
                _ => &mut contact.email,
            };
            *slot = value;
            QuotePatch::contact(contact)
        }
        Field::PromoCode => return None,
    };
    Some(patch)
}

/// Patch for a choice or toggle row; `None` for rows handled by the wizard itself
pub fn selection_patch(quote: &QuoteState, action: &RowAction) -> Option<QuotePatch> {
    let patch = match *action {
        RowAction::SetFilmType(film) => QuotePatch::ppf(quote.ppf.clone().with_film_type(film)),
        RowAction::ToggleFusion => {
            let mut ppf = quote.ppf.clone();
            ppf.is_fusion = !ppf.is_fusion;
            QuotePatch::ppf(ppf)
        }
        RowAction::SetPpfPackage(package) => QuotePatch::ppf(quote.ppf.clone().with_package(package)),
        RowAction::TogglePpfZone(zone) => QuotePatch::ppf(quote.ppf.clone().toggle_zone(zone)),
        RowAction::SetTintType(tint_type) => {
            let mut tint = quote.tint.clone();
            tint.tint_type = Some(tint_type);
            QuotePatch::tint(tint)
        }
        RowAction::SetTintPackage(package) => {
            let mut tint = quote.tint.clone();
            tint.package = Some(package);
            QuotePatch::tint(tint)
        }
        RowAction::ToggleTintAddon(addon) => {
            let mut tint = quote.tint.clone();
            flip(&mut tint.add_ons, addon);
            QuotePatch::tint(tint)
        }
        RowAction::SetCeramicPackage(package) => {
            let mut ceramic = quote.ceramic.clone();
            ceramic.package = Some(package);
            QuotePatch::ceramic(ceramic)
        }
        RowAction::ToggleCeramicAddon(addon) => {
            let mut ceramic = quote.ceramic.clone();
            flip(&mut ceramic.add_ons, addon);
            QuotePatch::ceramic(ceramic)
        }
        RowAction::SetPaintCorrection(level) => {
            QuotePatch { paint_correction: Some(Some(level)), ..Default::default() }
        }
        RowAction::ToggleInterior(option) => {
            let mut interior = quote.interior.clone();
            flip(&mut interior, option);
            QuotePatch { interior: Some(interior), ..Default::default() }
        }
        RowAction::ToggleWindshieldAddon(addon) => {
            let mut windshield = quote.windshield.clone();
            flip(&mut windshield.add_ons, addon);
            QuotePatch { windshield: Some(windshield), ..Default::default() }
        }
        RowAction::SetUndercoating(package) => {
            QuotePatch { undercoating: Some(Some(package)), ..Default::default() }
        }
        RowAction::CycleContactMethod => {
            let mut contact = quote.contact.clone();
            contact.method = contact.method.cycle();
            QuotePatch::contact(contact)
        }
        _ => return None,
    };
    Some(patch)
}

fn flip<T: Ord>(set: &mut BTreeSet<T>, item: T) {
    if !set.remove(&item) {
        set.insert(item);
    }
}

/// Make/model completion hint for the vehicle step
pub fn vehicle_hint(quote: &QuoteState) -> Option<String> {
    let make = quote.vehicle.make.trim();
    if make.is_empty() {
        return None;
    }

    let models = models_for(make);
    if !models.is_empty() {
        return Some(format!("Models: {}", models.join(", ")));
    }

    let makes = suggest_makes(make);
    if makes.is_empty() {
        None
    } else {
        Some(format!("Makes: {}", makes.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactMethod, PpfConfig};
    use crate::wizard::{MemorySessionStorage, QuoteStore, WizardTiming};

    fn wizard_with(quote: QuoteState) -> QuoteWizard {
        let storage = MemorySessionStorage::with_snapshot(&quote).unwrap();
        QuoteWizard::new(QuoteStore::open(Box::new(storage)), WizardTiming::default())
    }

    #[test]
    fn test_services_rows_reflect_selection() {
        let w = wizard_with(QuoteState { services: vec![ServiceKind::Tint], ..Default::default() });
        let rows = rows(&w);
        assert_eq!(rows.len(), ServiceKind::ALL.len());
        assert_eq!(rows[1].kind, RowKind::Toggle(true));
        assert_eq!(rows[0].kind, RowKind::Toggle(false));
    }

    #[test]
    fn test_package_rows_follow_film_type() {
        let mut w = wizard_with(QuoteState {
            services: vec![ServiceKind::Ppf],
            ppf: PpfConfig::default().with_film_type(FilmType::Stealth),
            ..Default::default()
        });
        w.next().unwrap();
        w.next().unwrap();
        assert_eq!(w.current_step(), Step::PpfPackage);

        let labels: Vec<_> = rows(&w).into_iter().map(|r| r.action).collect();
        assert_eq!(
            labels,
            vec![RowAction::SetPpfPackage(PpfPackage::Gold), RowAction::SetPpfPackage(PpfPackage::Platinum)]
        );
    }

    #[test]
    fn test_field_patch_updates_single_field() {
        let quote = QuoteState::default();
        let patch = field_patch(&quote, Field::VehicleMake, "Porsche".into()).unwrap();
        let mut updated = quote.clone();
        patch.apply_to(&mut updated);
        assert_eq!(updated.vehicle.make, "Porsche");
        assert!(updated.vehicle.year.is_empty());

        assert!(field_patch(&quote, Field::PromoCode, "X".into()).is_none());
    }

    #[test]
    fn test_selection_patch_cycles_contact_method() {
        let quote = QuoteState::default();
        let mut updated = quote.clone();
        selection_patch(&quote, &RowAction::CycleContactMethod).unwrap().apply_to(&mut updated);
        assert_eq!(updated.contact.method, ContactMethod::Call);
    }

    #[test]
    fn test_year_field_accepts_four_digits() {
        assert!(Field::VehicleYear.accepts("202", '4'));
        assert!(!Field::VehicleYear.accepts("2024", '1'));
        assert!(!Field::VehicleYear.accepts("", 'x'));
        assert!(!Field::PromoCode.accepts("NEW", ' '));
    }

    #[test]
    fn test_vehicle_hint() {
        let mut quote = QuoteState::default();
        assert_eq!(vehicle_hint(&quote), None);

        quote.vehicle.make = "por".into();
        assert_eq!(vehicle_hint(&quote).as_deref(), Some("Makes: Porsche"));

        quote.vehicle.make = "porsche".into();
        assert!(vehicle_hint(&quote).unwrap().starts_with("Models: 911"));
    }
}

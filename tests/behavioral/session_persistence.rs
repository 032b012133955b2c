// ABOUTME: Behavioral tests for write-through session storage and resume
//
// Verifies the JSON snapshot format, resume across store instances and
// clearing on reset.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use shieldquote::models::{FilmType, PpfConfig, QuotePatch, QuoteState, ServiceKind};
use shieldquote::wizard::{FileSessionStorage, QuoteStore, QuoteWizard, Step, WizardTiming};

use crate::fixtures::{complete_vehicle, wizard_with_storage};

fn file_wizard(dir: &TempDir) -> QuoteWizard {
    let storage = FileSessionStorage::new(dir.path().join("session.json"));
    QuoteWizard::new(QuoteStore::open(Box::new(storage)), WizardTiming::default())
}

#[test]
fn test_every_mutation_is_written_through() {
    let (mut w, storage) = wizard_with_storage(&QuoteState::default());

    w.toggle_service(ServiceKind::Tint);
    let saved: QuoteState = serde_json::from_str(&storage.raw().unwrap()).unwrap();
    assert_eq!(saved.services, vec![ServiceKind::Tint]);

    w.merge(QuotePatch::vehicle(complete_vehicle()));
    let saved: QuoteState = serde_json::from_str(&storage.raw().unwrap()).unwrap();
    assert_eq!(saved.vehicle, complete_vehicle());
}

#[test]
fn test_snapshot_uses_camel_case_keys() {
    let (mut w, storage) = wizard_with_storage(&QuoteState::default());
    w.toggle_service(ServiceKind::Ppf);
    w.merge(QuotePatch::ppf(PpfConfig::default().with_film_type(FilmType::Fashion)));

    let json: serde_json::Value = serde_json::from_str(&storage.raw().unwrap()).unwrap();
    assert_eq!(json["ppf"]["filmType"], "Fashion");
    assert!(json.get("promoCodes").is_some());
    assert!(json["tint"].get("type").is_some());
}

#[test]
fn test_quote_resumes_from_file() {
    let dir = TempDir::new().unwrap();

    {
        let mut w = file_wizard(&dir);
        w.toggle_service(ServiceKind::Ceramic);
        w.merge(QuotePatch::vehicle(complete_vehicle()));
        w.set_promo_input("ppftint10");
        w.apply_promo_input().unwrap();
    }

    let w = file_wizard(&dir);
    assert_eq!(w.quote().services, vec![ServiceKind::Ceramic]);
    assert_eq!(w.quote().vehicle.make, "Porsche");
    assert_eq!(w.quote().promo_codes, vec!["PPFTINT10".to_string()]);
    // Navigation position is not persisted
    assert_eq!(w.current_step(), Step::Services);
}

#[test]
fn test_start_over_clears_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut w = file_wizard(&dir);
    w.toggle_service(ServiceKind::Ceramic);
    assert!(path.exists());

    w.start_over();
    assert!(!path.exists());
    assert_eq!(file_wizard(&dir).quote(), &QuoteState::default());
}

#[test]
fn test_corrupt_session_starts_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("session.json"), "{ not json").unwrap();

    let w = file_wizard(&dir);
    assert_eq!(w.quote(), &QuoteState::default());
}

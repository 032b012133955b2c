// ABOUTME: CLI commands over the saved quote session - steps, analyze, reset
//
// Reads the session snapshot that the TUI writes through on every change

use anyhow::Result;
use serde::Serialize;

use super::OutputFormat;
use shieldquote::config::AppConfig;
use shieldquote::models::QuoteState;
use shieldquote::wizard::{build_steps, validate, Opportunity, OpportunityKind, Step};

/// One row of the `steps` listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInfo {
    pub index: usize,
    pub step: Step,
    pub title: &'static str,
    pub complete: bool,
}

/// Step graph with per-step gate status
pub fn step_infos(quote: &QuoteState) -> Vec<StepInfo> {
    build_steps(quote)
        .into_iter()
        .enumerate()
        .map(|(index, step)| StepInfo {
            index,
            step,
            title: step.title(),
            complete: validate(step, quote).is_ok(),
        })
        .collect()
}

/// Execute the steps command
pub fn steps(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let store = super::open_store(config)?;
    let infos = step_infos(store.get());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        OutputFormat::Text => {
            for line in store.get().summary_lines() {
                println!("  {line}");
            }
            if !store.get().services.is_empty() {
                println!();
            }
            for info in &infos {
                let mark = if info.complete { "\u{2713}" } else { " " };
                println!("{:>2}. [{}] {}", info.index + 1, mark, info.title);
            }
        }
    }
    Ok(())
}

/// Execute the analyze command
pub fn analyze_saved(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let store = super::open_store(config)?;
    let offers = config.wizard.promotion_rules().analyze(store.get());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&offers)?),
        OutputFormat::Text => print!("{}", format_offers(&offers)),
    }
    Ok(())
}

pub fn format_offers(offers: &[Opportunity]) -> String {
    if offers.is_empty() {
        return "No promotions apply to this quote yet.\n".to_string();
    }

    let mut out = String::new();
    for offer in offers {
        let tag = match offer.kind {
            OpportunityKind::FreeAddon => "FREE",
            OpportunityKind::Upsell => "SAVE",
        };
        out.push_str(&format!("[{}] {} ({})\n", tag, offer.title, offer.code));
        out.push_str(&format!("      {}\n", offer.description));
        out.push_str(&format!("      {}\n", offer.reason));
        if let Some(zones) = &offer.eligible_addons {
            let labels: Vec<_> = zones.iter().map(|z| z.label()).collect();
            out.push_str(&format!("      Pick one: {}\n", labels.join(", ")));
        }
    }
    out
}

/// Execute the reset command
pub fn reset(config: &AppConfig) -> Result<()> {
    let mut store = super::open_store(config)?;
    store.reset();
    println!("Saved quote cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shieldquote::models::{PpfConfig, PpfPackage, ServiceKind};
    use shieldquote::wizard::analyze;

    #[test]
    fn test_step_infos_mark_gated_steps() {
        let quote = QuoteState {
            services: vec![ServiceKind::Ppf],
            ppf: PpfConfig::default().with_package(PpfPackage::Gold),
            ..Default::default()
        };
        let infos = step_infos(&quote);

        assert_eq!(infos[0].step, Step::Services);
        assert!(infos[0].complete);
        let film = infos.iter().find(|i| i.step == Step::PpfType).unwrap();
        assert!(!film.complete);
        let package = infos.iter().find(|i| i.step == Step::PpfPackage).unwrap();
        assert!(package.complete);
    }

    #[test]
    fn test_format_offers() {
        assert!(format_offers(&[]).contains("No promotions"));

        let quote = QuoteState {
            services: vec![ServiceKind::Ppf],
            ppf: PpfConfig::default().with_package(PpfPackage::Gold),
            ..Default::default()
        };
        let text = format_offers(&analyze(&quote));
        assert!(text.contains("[FREE]"));
        assert!(text.contains("FREEADDON25"));
        assert!(text.contains("Pick one: Door Cups, Door Edges, Rocker Panels"));
    }
}

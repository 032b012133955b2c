// ABOUTME: CLI promos command - list the promo codes the quote form accepts

use anyhow::Result;

use super::OutputFormat;
use shieldquote::models::PROMO_REGISTRY;

/// Execute the promos command
pub fn execute(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(PROMO_REGISTRY)?),
        OutputFormat::Text => {
            let width = PROMO_REGISTRY.iter().map(|p| p.code.len()).max().unwrap_or(0);
            for promo in PROMO_REGISTRY {
                println!("{:<width$}  {}", promo.code, promo.description);
                println!("{:<width$}  {}", "", promo.rules);
            }
        }
    }
    Ok(())
}

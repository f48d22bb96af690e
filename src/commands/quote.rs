use anyhow::{Context, Result};
use colored::Colorize;
use starterkart::{
    catalog::{select_source, CatalogSource, StaticCatalogSource},
    config, contact, quote,
};
use std::{collections::BTreeSet, path::Path, sync::Arc};

/// Execute the quote command
///
/// Loads the catalog the server would use (or the built-in one with
/// `--offline`) and prints the breakdown plus the WhatsApp link.
pub async fn execute(config_path: &Path, plan: &str, addons: Vec<String>, offline: bool) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    let source: Arc<dyn CatalogSource> = if offline {
        Arc::new(StaticCatalogSource)
    } else {
        select_source(&cfg.store, reqwest::Client::new())
    };
    let catalog = source.load().await;

    let add_on_ids: BTreeSet<String> = addons.into_iter().collect();
    let quote = quote::quote(&catalog, plan, &add_on_ids)
        .with_context(|| format!("Cannot quote plan '{}'", plan))?;

    println!("{} ({} catalog)", "Quote".bold(), source.kind());
    println!("  {:<24} ₹{}", quote.plan_line.name, quote.plan_line.price);
    for line in &quote.add_on_lines {
        println!("  {:<24} ₹{}", line.name, line.price);
    }
    for id in &add_on_ids {
        if !quote.add_on_lines.iter().any(|l| &l.id == id) {
            println!("  {} {}", "skipped (not available for this plan):".dimmed(), id);
        }
    }
    if quote.discount > 0 {
        println!("  {:<24} -₹{}", "Discount".green(), quote.discount);
    }
    println!("  {:<24} ₹{}", "Total".bold(), quote.total);
    println!();
    println!("{}", contact::quote_link(&cfg.contact.whatsapp_number, &quote).cyan());

    Ok(())
}

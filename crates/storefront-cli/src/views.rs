//! Read-only product views: display ranking and tag usage.

use std::path::Path;
use std::process::ExitCode;

use clap::ValueEnum;
use storefront_catalog::{rank, tags_by_count, DisplayContext, UsageCount};
use storefront_core::{validate_products, Product};

use crate::load::{read_json, PRODUCTS_FILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankMode {
    /// Priority descending, shuffled within equal priority
    Priority,
    /// Featured/best-value/bestseller tiers, then alphabetical
    Intelligent,
    /// Best-value products first
    BestValue,
    /// Featured products only
    Featured,
}

impl From<RankMode> for DisplayContext {
    fn from(mode: RankMode) -> Self {
        match mode {
            RankMode::Priority => DisplayContext::Home,
            RankMode::Intelligent => DisplayContext::Catalog,
            RankMode::BestValue => DisplayContext::BestValue,
            RankMode::Featured => DisplayContext::Featured,
        }
    }
}

/// Products that pass schema validation; the rest are logged and skipped.
fn load_valid_products(data_dir: &Path) -> anyhow::Result<Vec<Product>> {
    let report = validate_products(&read_json(&data_dir.join(PRODUCTS_FILE))?)?;
    for failure in &report.failures {
        tracing::warn!(
            product = %failure.entity,
            errors = %failure.errors,
            "skipping invalid product"
        );
    }
    Ok(report.valid)
}

pub(crate) fn render_ranked(products: &[Product], limit: Option<usize>) -> String {
    products
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|p| format!("{}\n", p.id))
        .collect()
}

pub(crate) fn render_counts(counts: &[UsageCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{:>4}  {}\n", c.count, c.id))
        .collect()
}

pub(crate) fn run_rank(
    data_dir: &Path,
    mode: RankMode,
    limit: Option<usize>,
) -> anyhow::Result<ExitCode> {
    let products = load_valid_products(data_dir)?;
    let ranked = rank(&products, mode.into(), &mut rand::rng());
    print!("{}", render_ranked(&ranked, limit));
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn run_tag_counts(data_dir: &Path) -> anyhow::Result<ExitCode> {
    let products = load_valid_products(data_dir)?;
    print!("{}", render_counts(&tags_by_count(&products)));
    Ok(ExitCode::SUCCESS)
}

//! `validate`: schema and reference checks over the whole snapshot.

use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

use storefront_catalog::{
    check_references, group_failures, group_relationship_errors, render_grouped, EntityGroup,
    ReferenceReport,
};
use storefront_core::{
    validate_categories, validate_faqs, validate_products, validate_tag_map,
    validate_tag_map_strict, validate_testimonials, CatalogUniverse, Category, CollectionReport,
    EntityFailure, Faq, Product, Tag, Testimonial,
};

use crate::load::{load_raw_snapshot, ProductFile, RawSnapshot};

/// Records that passed schema validation.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub faqs: Vec<Faq>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug)]
pub(crate) struct ValidationOutcome {
    pub snapshot: Snapshot,
    /// Schema failures per collection title; empty groups are omitted.
    pub schema: Vec<(&'static str, Vec<EntityGroup>)>,
    pub references: ReferenceReport,
}

impl ValidationOutcome {
    pub(crate) fn passed(&self) -> bool {
        self.schema.is_empty() && self.references.success
    }
}

fn collect<T>(
    title: &'static str,
    report: CollectionReport<T>,
    into: &mut Vec<T>,
    schema: &mut Vec<(&'static str, Vec<EntityGroup>)>,
) {
    into.extend(report.valid);
    let groups = group_failures(&report.failures);
    if !groups.is_empty() {
        schema.push((title, groups));
    }
}

/// Validate per-product content files, labelling failures `product/entry`.
fn collect_product_files<T, F>(
    title: &'static str,
    files: &[ProductFile],
    product_ids: &HashSet<&str>,
    validate: F,
    into: &mut Vec<T>,
    schema: &mut Vec<(&'static str, Vec<EntityGroup>)>,
) -> anyhow::Result<()>
where
    F: Fn(&serde_json::Value) -> Result<CollectionReport<T>, storefront_core::SchemaError>,
{
    let mut failures = Vec::new();
    for file in files {
        if !product_ids.contains(file.product_id.as_str()) {
            tracing::warn!(
                product = %file.product_id,
                collection = title,
                "content file does not match any product id"
            );
        }
        let report = validate(&file.value)
            .map_err(|e| anyhow::anyhow!("{title}/{}.json: {e}", file.product_id))?;
        into.extend(report.valid);
        failures.extend(report.failures.into_iter().map(|f| EntityFailure {
            entity: format!("{}/{}", file.product_id, f.entity),
            errors: f.errors,
        }));
    }
    let groups = group_failures(&failures);
    if !groups.is_empty() {
        schema.push((title, groups));
    }
    Ok(())
}

/// Run every schema validator, then the reference check over what passed.
///
/// # Errors
///
/// Fails only when a top-level collection has the wrong JSON shape.
pub(crate) fn validate_snapshot(
    raw: &RawSnapshot,
    universe: &CatalogUniverse,
    strict_tags: bool,
) -> anyhow::Result<ValidationOutcome> {
    let mut snapshot = Snapshot::default();
    let mut schema = Vec::new();

    collect(
        "products",
        validate_products(&raw.products)?,
        &mut snapshot.products,
        &mut schema,
    );
    collect(
        "categories",
        validate_categories(&raw.categories, universe)?,
        &mut snapshot.categories,
        &mut schema,
    );
    let tags = if strict_tags {
        validate_tag_map_strict(&raw.tags, universe)?
    } else {
        validate_tag_map(&raw.tags)?
    };
    collect("tags", tags, &mut snapshot.tags, &mut schema);

    let product_ids: HashSet<&str> = raw
        .products
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p.get("id").and_then(serde_json::Value::as_str))
        .collect();
    collect_product_files(
        "faqs",
        &raw.faqs,
        &product_ids,
        validate_faqs,
        &mut snapshot.faqs,
        &mut schema,
    )?;
    collect_product_files(
        "testimonials",
        &raw.testimonials,
        &product_ids,
        validate_testimonials,
        &mut snapshot.testimonials,
        &mut schema,
    )?;

    let references = check_references(
        &snapshot.products,
        &snapshot.categories,
        &snapshot.tags,
        &snapshot.testimonials,
        &snapshot.faqs,
    );

    Ok(ValidationOutcome {
        snapshot,
        schema,
        references,
    })
}

/// Render the outcome the way `validate` prints it.
pub(crate) fn render_outcome(outcome: &ValidationOutcome) -> String {
    let mut out = String::new();
    for (title, groups) in &outcome.schema {
        out.push_str(&render_grouped(title, groups));
    }
    out.push_str(&render_grouped(
        "references",
        &group_relationship_errors(&outcome.references.errors),
    ));
    out
}

pub(crate) fn run_validate(
    data_dir: &Path,
    universe: &CatalogUniverse,
    strict_tags: bool,
) -> anyhow::Result<ExitCode> {
    let raw = load_raw_snapshot(data_dir)?;
    let outcome = validate_snapshot(&raw, universe, strict_tags)?;

    let orphans = &outcome.references.orphans;
    for id in &orphans.faqs {
        tracing::info!(faq = %id, "FAQ is not referenced by any product");
    }
    for id in &orphans.testimonials {
        tracing::info!(testimonial = %id, "testimonial is not referenced by any product");
    }

    let snapshot = &outcome.snapshot;
    if outcome.passed() {
        println!(
            "ok: {} products, {} categories, {} tags, {} faqs, {} testimonials",
            snapshot.products.len(),
            snapshot.categories.len(),
            snapshot.tags.len(),
            snapshot.faqs.len(),
            snapshot.testimonials.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    eprint!("{}", render_outcome(&outcome));
    let schema_issues: usize = outcome
        .schema
        .iter()
        .flat_map(|(_, groups)| groups)
        .map(|g| g.lines.len())
        .sum();
    eprintln!(
        "validation failed: {schema_issues} schema issues, {} broken references",
        outcome.references.errors.len()
    );
    Ok(ExitCode::FAILURE)
}

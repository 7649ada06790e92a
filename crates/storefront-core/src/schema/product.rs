use std::collections::HashSet;

use serde_json::Value;

use super::checks;
use super::content::{check_faq, check_testimonial, read_faq, read_testimonial};
use super::fields::{string_item, Fields};
use super::{json_kind, validate_array, validate_fields, CollectionReport, SchemaError, ValidationErrors};
use crate::entities::{
    Benefits, CopyBlock, EntryRef, Identified, PriceTier, Product, SecondaryCategory,
    Subscription, Variant,
};
use crate::normalize::normalize_tag;

/// Validate one raw product record.
///
/// Only checks that can be decided from the record alone; category, tag and
/// cross-sell resolution happen in the integrity pass.
///
/// # Errors
///
/// Returns every field issue found in the record.
pub fn validate_product(raw: &Value) -> Result<Product, ValidationErrors> {
    validate_fields(raw, read_product, check_product)
}

/// Validate a top-level products array.
///
/// # Errors
///
/// Returns `SchemaError::ExpectedArray` if `raw` is not an array. Bad records
/// are collected in the report instead.
pub fn validate_products(raw: &Value) -> Result<CollectionReport<Product>, SchemaError> {
    validate_array("products", raw, validate_product)
}

fn read_product(fields: &mut Fields<'_>) -> Product {
    Product {
        id: fields.required("id"),
        name: fields.required("name"),
        tagline: fields.optional("tagline"),
        description: fields.required("description"),
        price: fields.required("price"),
        price_display: fields.required("priceDisplay"),
        price_tier: fields.required_or("priceTier", PriceTier::Free),
        purchase_url: fields.optional("purchaseUrl"),
        image: fields.optional("image"),
        main_category: fields.required("mainCategory"),
        secondary_categories: fields
            .list("secondaryCategories", |fields, path, value| {
                Some(fields.nest(path, value, read_secondary).unwrap_or_default())
            })
            .unwrap_or_default(),
        tags: fields.required_list("tags", string_item),
        problem: fields.required_object("problem", read_copy),
        agitate: fields.required_object("agitate", read_copy),
        solution: fields.required_object("solution", read_copy),
        features: fields.list("features", string_item).unwrap_or_default(),
        benefits: fields.object("benefits", read_benefits).unwrap_or_default(),
        included: fields.list("included", string_item).unwrap_or_default(),
        variants: fields.list("variants", |fields, path, value| {
            Some(fields.nest(path, value, read_variant).unwrap_or_default())
        }),
        subscription: fields.object("subscription", read_subscription),
        featured: fields.defaulted("featured"),
        best_value: fields.defaulted("bestValue"),
        bestseller: fields.defaulted("bestseller"),
        priority: fields.optional("priority"),
        cross_sell_ids: fields.list("crossSellIds", string_item).unwrap_or_default(),
        faq_ids: fields.list("faqIds", |fields, path, value| {
            Some(read_entry_ref(fields, path, value, read_faq))
        }),
        testimonial_ids: fields.list("testimonialIds", |fields, path, value| {
            Some(read_entry_ref(fields, path, value, read_testimonial))
        }),
    }
}

fn read_secondary(fields: &mut Fields<'_>) -> SecondaryCategory {
    SecondaryCategory {
        id: fields.required("id"),
        distant: fields.optional("distant"),
    }
}

fn read_copy(fields: &mut Fields<'_>) -> CopyBlock {
    CopyBlock {
        text: fields.required("text"),
        points: fields.required_list("points", string_item),
    }
}

fn read_benefits(fields: &mut Fields<'_>) -> Benefits {
    Benefits {
        immediate: fields.list("immediate", string_item),
        systematic: fields.list("systematic", string_item),
        long_term: fields.list("longTerm", string_item),
    }
}

fn read_variant(fields: &mut Fields<'_>) -> Variant {
    Variant {
        id: fields.required("id"),
        name: fields.required("name"),
        price: fields.required("price"),
        price_display: fields.required("priceDisplay"),
        purchase_url: fields.required("purchaseUrl"),
    }
}

fn read_subscription(fields: &mut Fields<'_>) -> Subscription {
    Subscription {
        frequencies: fields.required_list("frequencies", |fields, path, value| {
            fields.item(path, value)
        }),
        prices: fields.entries("prices").unwrap_or_default(),
    }
}

/// A bare id string, or an embedded record read with `read`.
fn read_entry_ref<'a, T, R>(
    fields: &mut Fields<'a>,
    path: &str,
    value: &'a Value,
    read: R,
) -> EntryRef<T>
where
    R: FnOnce(&mut Fields<'a>) -> T,
{
    match value {
        Value::String(id) => EntryRef::Id(id.clone()),
        Value::Object(_) => fields
            .nest(path, value, read)
            .map_or_else(|| EntryRef::Id(String::new()), EntryRef::Embedded),
        other => {
            fields.push(
                path,
                format!("expected an id string or an object, found {}", json_kind(other)),
            );
            EntryRef::Id(String::new())
        }
    }
}

fn check_product(product: &Product, errors: &mut ValidationErrors) {
    checks::slug(errors, "id", &product.id);
    checks::non_empty(errors, "name", &product.name);
    checks::optional_non_empty(errors, "tagline", product.tagline.as_deref());
    checks::non_empty(errors, "description", &product.description);
    checks::amount(errors, "price", product.price);
    checks::non_empty(errors, "priceDisplay", &product.price_display);
    checks::optional_url(errors, "purchaseUrl", product.purchase_url.as_deref());
    checks::optional_url(errors, "image", product.image.as_deref());

    checks::non_empty(errors, "mainCategory", &product.main_category);
    for (i, secondary) in product.secondary_categories.iter().enumerate() {
        let path = format!("secondaryCategories[{i}].id");
        checks::non_empty(errors, &path, &secondary.id);
        if secondary.id == product.main_category {
            errors.push(path, "repeats the main category");
        }
    }
    checks::unique(
        errors,
        "secondaryCategories",
        product.secondary_categories.iter().map(|c| c.id.as_str()),
    );

    check_tags(&product.tags, errors);

    check_copy(errors, "problem", &product.problem);
    check_copy(errors, "agitate", &product.agitate);
    check_copy(errors, "solution", &product.solution);

    checks::string_list(errors, "features", &product.features, false);
    checks::string_list(errors, "included", &product.included, false);
    for (path, bucket) in [
        ("benefits.immediate", &product.benefits.immediate),
        ("benefits.systematic", &product.benefits.systematic),
        ("benefits.longTerm", &product.benefits.long_term),
    ] {
        if let Some(entries) = bucket {
            checks::string_list(errors, path, entries, false);
        }
    }

    if let Some(variants) = &product.variants {
        check_variants(variants, errors);
    }
    if let Some(subscription) = &product.subscription {
        check_subscription(subscription, errors);
    }

    if let Some(priority) = product.priority {
        checks::int_range(errors, "priority", priority, 0, 100);
    }

    checks::string_list(errors, "crossSellIds", &product.cross_sell_ids, false);
    checks::unique(
        errors,
        "crossSellIds",
        product.cross_sell_ids.iter().map(String::as_str),
    );

    check_refs(errors, "faqIds", product.faq_refs(), check_faq);
    check_refs(
        errors,
        "testimonialIds",
        product.testimonial_refs(),
        check_testimonial,
    );
}

fn check_tags(tags: &[String], errors: &mut ValidationErrors) {
    if tags.is_empty() {
        errors.push("tags", "must contain at least one entry");
    }

    let mut seen = HashSet::new();
    for (i, tag) in tags.iter().enumerate() {
        let normalized = normalize_tag(tag);
        if normalized.trim_matches('-').is_empty() {
            errors.push(
                format!("tags[{i}]"),
                format!("'{tag}' has no letters or digits"),
            );
        } else if !seen.insert(normalized.clone()) {
            errors.push(
                format!("tags[{i}]"),
                format!("'{tag}' duplicates tag '{normalized}'"),
            );
        }
    }
}

fn check_copy(errors: &mut ValidationErrors, path: &str, block: &CopyBlock) {
    checks::non_empty(errors, &format!("{path}.text"), &block.text);
    checks::string_list(errors, &format!("{path}.points"), &block.points, true);
}

fn check_variants(variants: &[Variant], errors: &mut ValidationErrors) {
    if variants.is_empty() {
        errors.push("variants", "must contain at least one entry when present");
    }
    for (i, variant) in variants.iter().enumerate() {
        let path = format!("variants[{i}]");
        checks::non_empty(errors, &format!("{path}.id"), &variant.id);
        checks::non_empty(errors, &format!("{path}.name"), &variant.name);
        checks::amount(errors, &format!("{path}.price"), variant.price);
        checks::non_empty(errors, &format!("{path}.priceDisplay"), &variant.price_display);
        checks::url(errors, &format!("{path}.purchaseUrl"), &variant.purchase_url);
    }
    checks::unique(errors, "variants", variants.iter().map(|v| v.id.as_str()));
}

fn check_subscription(subscription: &Subscription, errors: &mut ValidationErrors) {
    if subscription.frequencies.is_empty() {
        errors.push(
            "subscription.frequencies",
            "must contain at least one entry",
        );
    }

    let mut listed = HashSet::new();
    for frequency in &subscription.frequencies {
        if !listed.insert(*frequency) {
            errors.push(
                "subscription.frequencies",
                format!("duplicate entry '{frequency}'"),
            );
        }
        if !subscription.prices.contains_key(frequency) {
            errors.push(
                "subscription.prices",
                format!("missing price for '{frequency}'"),
            );
        }
    }

    for (frequency, price) in &subscription.prices {
        let path = format!("subscription.prices.{frequency}");
        if !listed.contains(frequency) {
            errors.push(path.clone(), "frequency is not listed in subscription.frequencies");
        }
        checks::amount(errors, &path, *price);
    }
}

fn check_refs<T, F>(errors: &mut ValidationErrors, path: &str, refs: &[EntryRef<T>], check: F)
where
    T: Identified,
    F: Fn(&T, &mut ValidationErrors),
{
    for (i, entry) in refs.iter().enumerate() {
        let item_path = format!("{path}[{i}]");
        match entry {
            EntryRef::Id(id) => checks::non_empty(errors, &item_path, id),
            EntryRef::Embedded(record) => {
                let mut nested = ValidationErrors::new();
                check(record, &mut nested);
                errors.extend_prefixed(&item_path, nested);
            }
        }
    }
    checks::unique(errors, path, refs.iter().map(EntryRef::id));
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;

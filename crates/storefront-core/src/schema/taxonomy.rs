use serde_json::Value;

use super::checks;
use super::fields::Fields;
use super::{
    json_kind, validate_array, validate_fields, CollectionReport, EntityFailure, SchemaError,
    ValidationErrors,
};
use crate::entities::{Category, Tag};
use crate::universe::CatalogUniverse;

/// Validate one raw category record against the category universe.
///
/// # Errors
///
/// Returns every field issue found in the record.
pub fn validate_category(
    raw: &Value,
    universe: &CatalogUniverse,
) -> Result<Category, ValidationErrors> {
    validate_fields(raw, read_category, |category, errors| {
        if !universe.has_category(&category.id) {
            errors.push(
                "id",
                format!("'{}' is not a known category id", category.id),
            );
        }
        checks::non_empty(errors, "name", &category.name);
        checks::non_empty(errors, "description", &category.description);
        checks::optional_non_empty(errors, "icon", category.icon.as_deref());
        checks::optional_non_empty(errors, "color", category.color.as_deref());
        non_negative_priority(errors, category.priority);
    })
}

/// Validate a top-level categories array.
///
/// # Errors
///
/// Returns `SchemaError::ExpectedArray` if `raw` is not an array.
pub fn validate_categories(
    raw: &Value,
    universe: &CatalogUniverse,
) -> Result<CollectionReport<Category>, SchemaError> {
    validate_array("categories", raw, |item| validate_category(item, universe))
}

/// Validate one raw tag record.
///
/// # Errors
///
/// Returns every field issue found in the record.
pub fn validate_tag(raw: &Value) -> Result<Tag, ValidationErrors> {
    validate_fields(raw, read_tag, |tag, errors| {
        checks::slug(errors, "id", &tag.id);
        checks::non_empty(errors, "name", &tag.name);
        checks::non_empty(errors, "description", &tag.description);
        checks::optional_non_empty(errors, "icon", tag.icon.as_deref());
        if let Some(color) = &tag.color {
            checks::hex_color(errors, "color", color);
        }
        non_negative_priority(errors, tag.priority);
    })
}

fn read_category(fields: &mut Fields<'_>) -> Category {
    Category {
        id: fields.required("id"),
        name: fields.required("name"),
        description: fields.required("description"),
        icon: fields.optional("icon"),
        color: fields.optional("color"),
        featured: fields.defaulted("featured"),
        priority: fields.required("priority"),
    }
}

fn read_tag(fields: &mut Fields<'_>) -> Tag {
    Tag {
        id: fields.required("id"),
        name: fields.required("name"),
        description: fields.required("description"),
        icon: fields.optional("icon"),
        color: fields.optional("color"),
        featured: fields.defaulted("featured"),
        priority: fields.required("priority"),
    }
}

fn non_negative_priority(errors: &mut ValidationErrors, priority: i64) {
    if priority < 0 {
        errors.push("priority", format!("must be >= 0, found {priority}"));
    }
}

/// Validate a tag map keyed by tag id, accepting any subset of well-formed keys.
///
/// Each entry must itself be a valid tag whose `id` equals its key.
///
/// # Errors
///
/// Returns `SchemaError::ExpectedObject` if `raw` is not an object.
pub fn validate_tag_map(raw: &Value) -> Result<CollectionReport<Tag>, SchemaError> {
    let map = raw.as_object().ok_or(SchemaError::ExpectedObject {
        collection: "tags",
        found: json_kind(raw),
    })?;

    let mut report = CollectionReport::new();
    for (key, entry) in map {
        let mut errors = ValidationErrors::new();
        checks::slug(&mut errors, "key", key);

        match validate_tag(entry) {
            Ok(tag) => {
                if tag.id != *key {
                    errors.push("id", format!("'{}' does not match map key '{key}'", tag.id));
                }
                if errors.is_empty() {
                    report.valid.push(tag);
                    continue;
                }
            }
            Err(entry_errors) => {
                for issue in entry_errors.issues() {
                    errors.push(issue.path.clone(), issue.message.clone());
                }
            }
        }

        report.failures.push(EntityFailure {
            entity: key.clone(),
            errors,
        });
    }

    Ok(report)
}

/// Validate a tag map that must cover the tag universe exactly.
///
/// On top of [`validate_tag_map`], every universe tag id must have an entry
/// and no key outside the universe is allowed.
///
/// # Errors
///
/// Returns `SchemaError::ExpectedObject` if `raw` is not an object.
pub fn validate_tag_map_strict(
    raw: &Value,
    universe: &CatalogUniverse,
) -> Result<CollectionReport<Tag>, SchemaError> {
    let mut report = validate_tag_map(raw)?;
    let map = raw.as_object().ok_or(SchemaError::ExpectedObject {
        collection: "tags",
        found: json_kind(raw),
    })?;

    let mut unknown = Vec::new();
    report.valid.retain(|tag| {
        if universe.has_tag(&tag.id) {
            true
        } else {
            unknown.push(tag.id.clone());
            false
        }
    });
    for id in unknown {
        report.failures.push(EntityFailure {
            entity: id.clone(),
            errors: ValidationErrors::single("key", format!("'{id}' is not part of the tag universe")),
        });
    }

    for id in &universe.tags {
        if !map.contains_key(id) {
            report.failures.push(EntityFailure {
                entity: id.clone(),
                errors: ValidationErrors::single("key", format!("missing entry for tag id '{id}'")),
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;

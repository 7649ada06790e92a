//! Single-record shape validation.
//!
//! Every validator takes raw JSON and either returns the typed record or a
//! [`ValidationErrors`] list of `path: message` pairs. Collection validators
//! keep going past bad records so one run reports every defect; only a
//! top-level value of the wrong JSON kind is a hard [`SchemaError`].

pub(crate) mod checks;
mod content;
mod fields;
mod product;
mod taxonomy;

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::entities::Identified;
use fields::Fields;

pub use content::{validate_faq, validate_faqs, validate_testimonial, validate_testimonials};
pub use product::{validate_product, validate_products};
pub use taxonomy::{
    validate_categories, validate_category, validate_tag, validate_tag_map,
    validate_tag_map_strict,
};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{collection} must be a JSON array, found {found}")]
    ExpectedArray {
        collection: &'static str,
        found: &'static str,
    },

    #[error("{collection} must be a JSON object, found {found}")]
    ExpectedObject {
        collection: &'static str,
        found: &'static str,
    },
}

/// One failed constraint, addressed by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(path, message);
        errors
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Append `other`, prefixing each path with `prefix.`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for issue in other.issues {
            self.issues.push(FieldIssue {
                path: format!("{prefix}.{}", issue.path),
                message: issue.message,
            });
        }
    }

    /// Append the issues of `other` that are not at or below a path already
    /// recorded here.
    pub(crate) fn extend_uncovered(&mut self, other: ValidationErrors) {
        let recorded: Vec<String> = self.issues.iter().map(|i| i.path.clone()).collect();
        for issue in other.issues {
            if !recorded.iter().any(|path| is_within(&issue.path, path)) {
                self.issues.push(issue);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one issue was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// `path` equals `parent` or names a field or element inside it.
fn is_within(path: &str, parent: &str) -> bool {
    path.strip_prefix(parent)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with('['))
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A record that failed validation, labelled by its id (or position when the
/// id itself is missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFailure {
    pub entity: String,
    pub errors: ValidationErrors,
}

/// Outcome of validating a whole collection: the records that passed and the
/// ones that did not.
#[derive(Debug, Clone)]
pub struct CollectionReport<T> {
    pub valid: Vec<T>,
    pub failures: Vec<EntityFailure>,
}

impl<T> CollectionReport<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            valid: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of field issues across all failed records.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.failures.iter().map(|f| f.errors.len()).sum()
    }
}

impl<T> Default for CollectionReport<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a record with `read`, then run `check` on it.
///
/// A check on a path that already failed to decode is dropped, so each bad
/// field is reported once.
fn validate_fields<'a, T, R, C>(raw: &'a Value, read: R, check: C) -> Result<T, ValidationErrors>
where
    R: FnOnce(&mut Fields<'a>) -> T,
    C: FnOnce(&T, &mut ValidationErrors),
{
    let mut fields = Fields::new(raw)?;
    let record = read(&mut fields);
    let mut errors = fields.into_errors();
    let mut checked = ValidationErrors::new();
    check(&record, &mut checked);
    errors.extend_uncovered(checked);
    errors.finish(record)
}

fn entity_label(raw: &Value, index: usize) -> String {
    match raw.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => format!("#{index}"),
    }
}

/// Validate every element of a top-level array, rejecting repeated ids.
fn validate_array<T, F>(
    collection: &'static str,
    raw: &Value,
    validate_one: F,
) -> Result<CollectionReport<T>, SchemaError>
where
    T: Identified,
    F: Fn(&Value) -> Result<T, ValidationErrors>,
{
    let items = raw.as_array().ok_or(SchemaError::ExpectedArray {
        collection,
        found: json_kind(raw),
    })?;

    let mut report = CollectionReport::new();
    let mut seen = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let entity = entity_label(item, index);
        match validate_one(item) {
            Ok(record) => {
                if seen.insert(record.id().to_string()) {
                    report.valid.push(record);
                } else {
                    report.failures.push(EntityFailure {
                        errors: ValidationErrors::single(
                            "id",
                            format!("duplicate id '{}' in {collection}", record.id()),
                        ),
                        entity,
                    });
                }
            }
            Err(errors) => report.failures.push(EntityFailure { entity, errors }),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn validation_errors_display_joins_issues() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "must not be empty");
        errors.push("price", "must be >= 0");
        assert_eq!(
            errors.to_string(),
            "name: must not be empty; price: must be >= 0"
        );
    }

    #[test]
    fn extend_prefixed_nests_paths() {
        let mut outer = ValidationErrors::new();
        outer.extend_prefixed("variants[0]", ValidationErrors::single("price", "bad"));
        assert_eq!(outer.issues()[0].path, "variants[0].price");
    }

    #[test]
    fn finish_returns_value_when_empty() {
        assert_eq!(ValidationErrors::new().finish(7), Ok(7));
        assert!(ValidationErrors::single("a", "b").finish(7).is_err());
    }

    #[test]
    fn extend_uncovered_skips_paths_that_already_failed() {
        let mut errors = ValidationErrors::single("faqIds[0].answer", "is required");
        let mut checked = ValidationErrors::new();
        checked.push("faqIds[0].answer", "must not be empty");
        checked.push("faqIds[0].answerText", "must not be empty");
        checked.push("faqIds", "duplicate entry 'a'");
        errors.extend_uncovered(checked);
        let paths: Vec<&str> = errors.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["faqIds[0].answer", "faqIds[0].answerText", "faqIds"]);
    }

    #[test]
    fn is_within_matches_fields_and_elements() {
        assert!(is_within("price", "price"));
        assert!(is_within("problem.points", "problem"));
        assert!(is_within("tags[2]", "tags"));
        assert!(!is_within("priceDisplay", "price"));
        assert!(!is_within("tags", "tags[2]"));
    }

    #[test]
    fn entity_label_falls_back_to_index() {
        assert_eq!(entity_label(&json!({ "id": "x" }), 3), "x");
        assert_eq!(entity_label(&json!({ "id": "" }), 3), "#3");
        assert_eq!(entity_label(&json!(null), 0), "#0");
    }
}

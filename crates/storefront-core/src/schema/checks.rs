//! Field-level constraint helpers shared by the record validators.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationErrors;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?(?::\d+)?(?:[/?#]\S*)?$")
        .expect("valid url regex")
});

/// Lowercase letters and digits in hyphen-separated groups, e.g. `no-code`.
#[must_use]
pub(crate) fn is_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

pub(crate) fn non_empty(errors: &mut ValidationErrors, path: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(path, "must not be empty");
    }
}

pub(crate) fn optional_non_empty(errors: &mut ValidationErrors, path: &str, value: Option<&str>) {
    if let Some(v) = value {
        non_empty(errors, path, v);
    }
}

/// Every entry must be non-blank; when `required` the list itself must be non-empty.
pub(crate) fn string_list(
    errors: &mut ValidationErrors,
    path: &str,
    values: &[String],
    required: bool,
) {
    if required && values.is_empty() {
        errors.push(path, "must contain at least one entry");
    }
    for (i, value) in values.iter().enumerate() {
        non_empty(errors, &format!("{path}[{i}]"), value);
    }
}

/// Flag values that appear more than once in `values`.
pub(crate) fn unique<'a, I>(errors: &mut ValidationErrors, path: &str, values: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            errors.push(path, format!("duplicate entry '{value}'"));
        }
    }
}

pub(crate) fn slug(errors: &mut ValidationErrors, path: &str, value: &str) {
    if !is_slug(value) {
        errors.push(
            path,
            format!("'{value}' must be lowercase letters, digits, and single hyphens"),
        );
    }
}

pub(crate) fn url(errors: &mut ValidationErrors, path: &str, value: &str) {
    if !URL_RE.is_match(value) {
        errors.push(path, format!("'{value}' is not a valid http(s) URL"));
    }
}

pub(crate) fn optional_url(errors: &mut ValidationErrors, path: &str, value: Option<&str>) {
    if let Some(v) = value {
        url(errors, path, v);
    }
}

pub(crate) fn hex_color(errors: &mut ValidationErrors, path: &str, value: &str) {
    if !HEX_COLOR_RE.is_match(value) {
        errors.push(path, format!("'{value}' is not a hex color like #1a2b3c"));
    }
}

pub(crate) fn amount(errors: &mut ValidationErrors, path: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(path, format!("must be a non-negative number, found {value}"));
    }
}

pub(crate) fn int_range(errors: &mut ValidationErrors, path: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        errors.push(
            path,
            format!("must be between {min} and {max}, found {value}"),
        );
    }
}

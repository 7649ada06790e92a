use serde_json::Value;

use super::checks;
use super::fields::Fields;
use super::{validate_array, validate_fields, CollectionReport, SchemaError, ValidationErrors};
use crate::entities::{Faq, Testimonial};

/// Validate one raw FAQ record.
///
/// # Errors
///
/// Returns every field issue found in the record.
pub fn validate_faq(raw: &Value) -> Result<Faq, ValidationErrors> {
    validate_fields(raw, read_faq, check_faq)
}

/// Validate an FAQ array (one product's FAQ file).
///
/// # Errors
///
/// Returns `SchemaError::ExpectedArray` if `raw` is not an array.
pub fn validate_faqs(raw: &Value) -> Result<CollectionReport<Faq>, SchemaError> {
    validate_array("faqs", raw, validate_faq)
}

/// Validate one raw testimonial record.
///
/// # Errors
///
/// Returns every field issue found in the record.
pub fn validate_testimonial(raw: &Value) -> Result<Testimonial, ValidationErrors> {
    validate_fields(raw, read_testimonial, check_testimonial)
}

/// Validate a testimonial array (one product's testimonial file).
///
/// # Errors
///
/// Returns `SchemaError::ExpectedArray` if `raw` is not an array.
pub fn validate_testimonials(raw: &Value) -> Result<CollectionReport<Testimonial>, SchemaError> {
    validate_array("testimonials", raw, validate_testimonial)
}

pub(super) fn read_faq(fields: &mut Fields<'_>) -> Faq {
    Faq {
        id: fields.required("id"),
        question: fields.required("question"),
        answer: fields.required("answer"),
        order: fields.required("order"),
    }
}

pub(super) fn read_testimonial(fields: &mut Fields<'_>) -> Testimonial {
    Testimonial {
        id: fields.required("id"),
        author: fields.required("author"),
        role: fields.optional("role"),
        company: fields.optional("company"),
        avatar: fields.optional("avatar"),
        twitter: fields.optional("twitter"),
        rating: fields.required("rating"),
        quote: fields.required("quote"),
        featured: fields.defaulted("featured"),
    }
}

pub(super) fn check_faq(faq: &Faq, errors: &mut ValidationErrors) {
    checks::non_empty(errors, "id", &faq.id);
    checks::non_empty(errors, "question", &faq.question);
    checks::non_empty(errors, "answer", &faq.answer);
}

pub(super) fn check_testimonial(testimonial: &Testimonial, errors: &mut ValidationErrors) {
    checks::non_empty(errors, "id", &testimonial.id);
    checks::non_empty(errors, "author", &testimonial.author);
    checks::optional_non_empty(errors, "role", testimonial.role.as_deref());
    checks::optional_non_empty(errors, "company", testimonial.company.as_deref());
    checks::optional_url(errors, "avatar", testimonial.avatar.as_deref());
    checks::optional_non_empty(errors, "twitter", testimonial.twitter.as_deref());
    checks::int_range(errors, "rating", i64::from(testimonial.rating), 1, 5);
    checks::non_empty(errors, "quote", &testimonial.quote);
}

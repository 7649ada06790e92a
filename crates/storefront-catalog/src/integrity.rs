//! Referential integrity across the product, category, tag, FAQ and
//! testimonial collections.

use std::collections::HashSet;

use storefront_core::{normalize_tag, Category, Faq, Identified, Product, Tag, Testimonial};

/// Product field that holds a reference into another collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceField {
    MainCategory,
    SecondaryCategories,
    Tags,
    CrossSellIds,
    TestimonialIds,
    FaqIds,
}

impl ReferenceField {
    /// The JSON field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceField::MainCategory => "mainCategory",
            ReferenceField::SecondaryCategories => "secondaryCategories",
            ReferenceField::Tags => "tags",
            ReferenceField::CrossSellIds => "crossSellIds",
            ReferenceField::TestimonialIds => "testimonialIds",
            ReferenceField::FaqIds => "faqIds",
        }
    }
}

impl std::fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipError {
    pub product_id: String,
    pub field: ReferenceField,
    /// The value as written in the product record.
    pub value: String,
    pub message: String,
}

impl std::fmt::Display for RelationshipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.product_id, self.field, self.message)
    }
}

/// FAQs and testimonials that no product references. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanReport {
    pub testimonials: Vec<String>,
    pub faqs: Vec<String>,
}

impl OrphanReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.testimonials.is_empty() && self.faqs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceReport {
    pub success: bool,
    pub errors: Vec<RelationshipError>,
    pub orphans: OrphanReport,
}

/// Resolve every cross-collection reference in `products`.
///
/// Id sets are built once and every product is scanned, so the report holds
/// every dangling reference rather than the first one. Product tags are
/// compared after [`normalize_tag`]. Only bare FAQ/testimonial ids have to
/// resolve; embedded records stand on their own.
#[must_use]
pub fn check_references(
    products: &[Product],
    categories: &[Category],
    tags: &[Tag],
    testimonials: &[Testimonial],
    faqs: &[Faq],
) -> ReferenceReport {
    let category_ids = id_set(categories);
    let tag_ids: HashSet<String> = tags.iter().map(|t| normalize_tag(&t.id)).collect();
    let product_ids = id_set(products);
    let testimonial_ids = id_set(testimonials);
    let faq_ids = id_set(faqs);

    let mut errors = Vec::new();
    let mut referenced_testimonials = HashSet::new();
    let mut referenced_faqs = HashSet::new();

    for product in products {
        let mut fail = |field: ReferenceField, value: &str, message: String| {
            errors.push(RelationshipError {
                product_id: product.id.clone(),
                field,
                value: value.to_string(),
                message,
            });
        };

        if !category_ids.contains(product.main_category.as_str()) {
            fail(
                ReferenceField::MainCategory,
                &product.main_category,
                format!("main category '{}' does not exist", product.main_category),
            );
        }

        for secondary in &product.secondary_categories {
            if !category_ids.contains(secondary.id.as_str()) {
                fail(
                    ReferenceField::SecondaryCategories,
                    &secondary.id,
                    format!("secondary category '{}' does not exist", secondary.id),
                );
            }
        }

        for tag in &product.tags {
            let normalized = normalize_tag(tag);
            if !tag_ids.contains(&normalized) {
                fail(
                    ReferenceField::Tags,
                    tag,
                    format!("tag '{tag}' (normalized '{normalized}') does not exist"),
                );
            }
        }

        for cross_sell in &product.cross_sell_ids {
            if !product_ids.contains(cross_sell.as_str()) {
                fail(
                    ReferenceField::CrossSellIds,
                    cross_sell,
                    format!("cross-sell product '{cross_sell}' does not exist"),
                );
            }
        }

        for entry in product.testimonial_refs() {
            referenced_testimonials.insert(entry.id());
            if let Some(id) = entry.as_id() {
                if !testimonial_ids.contains(id) {
                    fail(
                        ReferenceField::TestimonialIds,
                        id,
                        format!("testimonial '{id}' does not exist"),
                    );
                }
            }
        }

        for entry in product.faq_refs() {
            referenced_faqs.insert(entry.id());
            if let Some(id) = entry.as_id() {
                if !faq_ids.contains(id) {
                    fail(
                        ReferenceField::FaqIds,
                        id,
                        format!("FAQ '{id}' does not exist"),
                    );
                }
            }
        }
    }

    let orphans = OrphanReport {
        testimonials: unreferenced(testimonials, &referenced_testimonials),
        faqs: unreferenced(faqs, &referenced_faqs),
    };

    tracing::debug!(
        products = products.len(),
        errors = errors.len(),
        orphan_testimonials = orphans.testimonials.len(),
        orphan_faqs = orphans.faqs.len(),
        "reference check finished"
    );

    ReferenceReport {
        success: errors.is_empty(),
        errors,
        orphans,
    }
}

fn id_set<T: Identified>(items: &[T]) -> HashSet<&str> {
    items.iter().map(Identified::id).collect()
}

fn unreferenced<T: Identified>(items: &[T], referenced: &HashSet<&str>) -> Vec<String> {
    items
        .iter()
        .map(Identified::id)
        .filter(|id| !referenced.contains(id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "integrity_test.rs"]
mod tests;

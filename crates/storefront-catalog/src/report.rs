//! Human-readable grouping of validation failures by entity id.

use std::fmt::Write as _;

use storefront_core::EntityFailure;

use crate::integrity::RelationshipError;

/// All `field: message` lines for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityGroup {
    pub entity: String,
    pub lines: Vec<String>,
}

fn push_line(groups: &mut Vec<EntityGroup>, entity: &str, line: String) {
    match groups.iter_mut().find(|g| g.entity == entity) {
        Some(group) => group.lines.push(line),
        None => groups.push(EntityGroup {
            entity: entity.to_string(),
            lines: vec![line],
        }),
    }
}

/// Group referential errors by product id, in first-seen order.
#[must_use]
pub fn group_relationship_errors(errors: &[RelationshipError]) -> Vec<EntityGroup> {
    let mut groups = Vec::new();
    for error in errors {
        push_line(
            &mut groups,
            &error.product_id,
            format!("{}: {}", error.field, error.message),
        );
    }
    groups
}

/// Group schema failures by entity, in first-seen order.
#[must_use]
pub fn group_failures(failures: &[EntityFailure]) -> Vec<EntityGroup> {
    let mut groups = Vec::new();
    for failure in failures {
        for issue in failure.errors.issues() {
            push_line(&mut groups, &failure.entity, issue.to_string());
        }
    }
    groups
}

/// Render groups as an indented block under `title`.
///
/// ```text
/// products:
///   launch-kit
///     tags: tag 'crypto' (normalized 'crypto') does not exist
/// ```
#[must_use]
pub fn render_grouped(title: &str, groups: &[EntityGroup]) -> String {
    let mut out = String::new();
    if groups.is_empty() {
        return out;
    }
    let _ = writeln!(out, "{title}:");
    for group in groups {
        let _ = writeln!(out, "  {}", group.entity);
        for line in &group.lines {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use storefront_core::ValidationErrors;

    use super::*;
    use crate::integrity::ReferenceField;

    fn rel(product: &str, field: ReferenceField, message: &str) -> RelationshipError {
        RelationshipError {
            product_id: product.to_string(),
            field,
            value: "v".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn groups_relationship_errors_by_product_in_first_seen_order() {
        let groups = group_relationship_errors(&[
            rel("b", ReferenceField::Tags, "tag missing"),
            rel("a", ReferenceField::MainCategory, "category missing"),
            rel("b", ReferenceField::FaqIds, "faq missing"),
        ]);
        assert_eq!(
            groups,
            vec![
                EntityGroup {
                    entity: "b".to_string(),
                    lines: vec![
                        "tags: tag missing".to_string(),
                        "faqIds: faq missing".to_string()
                    ],
                },
                EntityGroup {
                    entity: "a".to_string(),
                    lines: vec!["mainCategory: category missing".to_string()],
                },
            ]
        );
    }

    #[test]
    fn groups_schema_failures_with_field_paths() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "must not be empty");
        errors.push("price", "must be a non-negative number, found -1");
        let groups = group_failures(&[EntityFailure {
            entity: "kit".to_string(),
            errors,
        }]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines[0], "name: must not be empty");
    }

    #[test]
    fn render_indents_entities_and_lines() {
        let rendered = render_grouped(
            "products",
            &[EntityGroup {
                entity: "kit".to_string(),
                lines: vec!["tags: missing".to_string()],
            }],
        );
        assert_eq!(rendered, "products:\n  kit\n    tags: missing\n");
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(render_grouped("products", &[]), "");
    }
}

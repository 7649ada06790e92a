//! Cross-collection integrity, priority bookkeeping, and display ranking for
//! a validated catalog snapshot.
//!
//! Every function here borrows its input and returns a fresh collection; the
//! caller's records are never modified in place.

pub mod aggregate;
pub mod integrity;
pub mod priority;
pub mod ranking;
pub mod report;

pub use aggregate::{
    categories_by_count, category_counts, featured_items, products_in_category,
    products_with_tag, sort_by_priority, tag_counts, tags_by_count, UsageCount,
};
pub use integrity::{
    check_references, OrphanReport, ReferenceField, ReferenceReport, RelationshipError,
};
pub use priority::{
    auto_renumber, calculate_stats, move_down, move_up, validate_priorities, Partition,
    PriorityGap, PriorityReport, PriorityStats, PriorityViolation,
};
pub use ranking::{
    rank, sort_best_value, sort_by_priority_randomized, sort_by_priority_randomized_with,
    sort_featured, sort_intelligently, DisplayContext,
};
pub use report::{group_failures, group_relationship_errors, render_grouped, EntityGroup};

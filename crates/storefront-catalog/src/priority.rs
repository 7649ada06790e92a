//! Priority bookkeeping for featured/non-featured collections (tags and
//! categories).
//!
//! Featured items live in `[featured_start, non_featured_start)`, everything
//! else from `non_featured_start` up, and within each partition priorities
//! should run without gaps.

use std::collections::BTreeMap;

use storefront_core::{FeaturedPrioritized, RenumberConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Featured,
    NonFeatured,
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Featured => write!(f, "featured"),
            Partition::NonFeatured => write!(f, "non-featured"),
        }
    }
}

/// A slot where the item's priority is not the next number in its partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityGap {
    pub partition: Partition,
    pub name: String,
    pub expected: i64,
    pub actual: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityStats {
    pub total: usize,
    pub featured: usize,
    pub non_featured: usize,
    /// `(min, max)` priority among featured items.
    pub featured_range: Option<(i64, i64)>,
    /// `(min, max)` priority among non-featured items.
    pub non_featured_range: Option<(i64, i64)>,
    pub has_priority_gaps: bool,
    /// Every mismatch, `None` when there are no gaps.
    pub gaps: Option<Vec<PriorityGap>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityViolation {
    Duplicate {
        priority: i64,
        names: Vec<String>,
    },
    FeaturedOutOfRange {
        name: String,
        priority: i64,
        featured_start: i64,
        non_featured_start: i64,
    },
    BelowMinimum {
        name: String,
        priority: i64,
        non_featured_start: i64,
    },
}

impl std::fmt::Display for PriorityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityViolation::Duplicate { priority, names } => {
                write!(f, "Duplicate priority {priority}: {}", names.join(", "))
            }
            PriorityViolation::FeaturedOutOfRange {
                name,
                priority,
                featured_start,
                non_featured_start,
            } => write!(
                f,
                "Featured item \"{name}\" has priority {priority} outside valid range \
                 [{featured_start}, {non_featured_start})"
            ),
            PriorityViolation::BelowMinimum {
                name,
                priority,
                non_featured_start,
            } => write!(
                f,
                "Non-featured item \"{name}\" has priority {priority} below minimum \
                 {non_featured_start}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityReport {
    pub success: bool,
    pub errors: Vec<PriorityViolation>,
}

/// Split into (featured, non-featured), each stably sorted by current priority.
fn partitions<T: FeaturedPrioritized>(items: &[T]) -> (Vec<&T>, Vec<&T>) {
    let (mut featured, mut rest): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| item.is_featured());
    featured.sort_by_key(|item| item.priority());
    rest.sort_by_key(|item| item.priority());
    (featured, rest)
}

fn range<T: FeaturedPrioritized>(sorted: &[&T]) -> Option<(i64, i64)> {
    Some((sorted.first()?.priority(), sorted.last()?.priority()))
}

fn collect_gaps<T: FeaturedPrioritized>(
    partition: Partition,
    sorted: &[&T],
    start: i64,
    gaps: &mut Vec<PriorityGap>,
) {
    for (expected, item) in (start..).zip(sorted) {
        if item.priority() != expected {
            gaps.push(PriorityGap {
                partition,
                name: item.name().to_string(),
                expected,
                actual: item.priority(),
            });
        }
    }
}

#[must_use]
pub fn calculate_stats<T: FeaturedPrioritized>(
    items: &[T],
    config: &RenumberConfig,
) -> PriorityStats {
    let (featured, rest) = partitions(items);

    let mut gaps = Vec::new();
    collect_gaps(Partition::Featured, &featured, config.featured_start, &mut gaps);
    collect_gaps(
        Partition::NonFeatured,
        &rest,
        config.non_featured_start,
        &mut gaps,
    );

    PriorityStats {
        total: items.len(),
        featured: featured.len(),
        non_featured: rest.len(),
        featured_range: range(&featured),
        non_featured_range: range(&rest),
        has_priority_gaps: !gaps.is_empty(),
        gaps: (!gaps.is_empty()).then_some(gaps),
    }
}

/// Reassign consecutive priorities in each partition, keeping relative order.
///
/// The result lists featured items first, then non-featured, each in
/// priority order. Ties keep their input order.
#[must_use]
pub fn auto_renumber<T: FeaturedPrioritized>(items: &[T], config: &RenumberConfig) -> Vec<T> {
    let (featured, rest) = partitions(items);

    let renumbered: Vec<T> = (config.featured_start..)
        .zip(featured)
        .chain((config.non_featured_start..).zip(rest))
        .map(|(priority, item)| {
            let mut item = item.clone();
            item.set_priority(priority);
            item
        })
        .collect();

    tracing::debug!(items = renumbered.len(), "renumbered priorities");
    renumbered
}

/// Swap `items[index]` with the item before it, exchanging their priorities.
///
/// Returns an unchanged copy when `index` is 0 or out of bounds.
#[must_use]
pub fn move_up<T: FeaturedPrioritized>(items: &[T], index: usize) -> Vec<T> {
    if index == 0 || index >= items.len() {
        return items.to_vec();
    }
    swap_with_priorities(items, index - 1, index)
}

/// Swap `items[index]` with the item after it, exchanging their priorities.
///
/// Returns an unchanged copy when `index` is the last position or out of bounds.
#[must_use]
pub fn move_down<T: FeaturedPrioritized>(items: &[T], index: usize) -> Vec<T> {
    if index.saturating_add(1) >= items.len() {
        return items.to_vec();
    }
    swap_with_priorities(items, index, index + 1)
}

fn swap_with_priorities<T: FeaturedPrioritized>(items: &[T], a: usize, b: usize) -> Vec<T> {
    let mut out = items.to_vec();
    let (pa, pb) = (out[a].priority(), out[b].priority());
    out[a].set_priority(pb);
    out[b].set_priority(pa);
    out.swap(a, b);
    out
}

/// Check for duplicate priorities and partition range violations.
///
/// All violations are reported; duplicates first (by priority), then range
/// problems in input order.
#[must_use]
pub fn validate_priorities<T: FeaturedPrioritized>(
    items: &[T],
    config: &RenumberConfig,
) -> PriorityReport {
    let mut errors = Vec::new();

    let mut by_priority: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for item in items {
        by_priority
            .entry(item.priority())
            .or_default()
            .push(item.name().to_string());
    }
    for (priority, names) in by_priority {
        if names.len() > 1 {
            errors.push(PriorityViolation::Duplicate { priority, names });
        }
    }

    for item in items {
        let priority = item.priority();
        if item.is_featured() {
            if priority < config.featured_start || priority >= config.non_featured_start {
                errors.push(PriorityViolation::FeaturedOutOfRange {
                    name: item.name().to_string(),
                    priority,
                    featured_start: config.featured_start,
                    non_featured_start: config.non_featured_start,
                });
            }
        } else if priority < config.non_featured_start {
            errors.push(PriorityViolation::BelowMinimum {
                name: item.name().to_string(),
                priority,
                non_featured_start: config.non_featured_start,
            });
        }
    }

    PriorityReport {
        success: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
#[path = "priority_test.rs"]
mod tests;

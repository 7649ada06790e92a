//! Display ordering for product lists.
//!
//! Two strategies: priority groups with a fresh shuffle inside each group,
//! and tiers derived from the `featured` / `bestValue` / `bestseller` flags.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use storefront_core::Product;

/// Page a product list is being ordered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayContext {
    /// Homepage: priority groups, shuffled within a group.
    Home,
    /// Catalog listing: flag tiers, remainder alphabetical.
    Catalog,
    BestValue,
    /// Featured products only.
    Featured,
}

/// Order `products` for `context`.
///
/// `rng` is only consulted for [`DisplayContext::Home`].
#[must_use]
pub fn rank<R: Rng + ?Sized>(
    products: &[Product],
    context: DisplayContext,
    rng: &mut R,
) -> Vec<Product> {
    match context {
        DisplayContext::Home => sort_by_priority_randomized_with(products, rng),
        DisplayContext::Catalog => sort_intelligently(products),
        DisplayContext::BestValue => sort_best_value(products),
        DisplayContext::Featured => sort_featured(products),
    }
}

/// Priority descending, with a uniform shuffle inside each priority group.
///
/// Intentionally non-deterministic: same-priority products rotate between
/// calls. A missing priority counts as 0.
#[must_use]
pub fn sort_by_priority_randomized(products: &[Product]) -> Vec<Product> {
    sort_by_priority_randomized_with(products, &mut rand::rng())
}

/// [`sort_by_priority_randomized`] with a caller-supplied RNG.
#[must_use]
pub fn sort_by_priority_randomized_with<R: Rng + ?Sized>(
    products: &[Product],
    rng: &mut R,
) -> Vec<Product> {
    let mut groups: BTreeMap<i64, Vec<Product>> = BTreeMap::new();
    for product in products {
        groups
            .entry(product.effective_priority())
            .or_default()
            .push(product.clone());
    }

    let mut ordered = Vec::with_capacity(products.len());
    for (_, mut group) in groups.into_iter().rev() {
        group.shuffle(rng);
        ordered.extend(group);
    }
    ordered
}

const REMAINDER_TIER: u8 = 5;

fn flags(product: &Product) -> (bool, bool, bool) {
    (product.featured, product.best_value, product.bestseller)
}

fn general_tier(product: &Product) -> u8 {
    match flags(product) {
        (true, true, true) => 1,
        (true, true, false) => 2,
        (true, false, true) => 3,
        (true, false, false) => 4,
        _ => REMAINDER_TIER,
    }
}

fn best_value_tier(product: &Product) -> u8 {
    match flags(product) {
        (true, true, true) => 1,
        (true, true, false) => 2,
        (false, true, true) => 3,
        (false, true, false) => 4,
        _ => REMAINDER_TIER,
    }
}

/// Remainder ordering: main category, then name, then id.
fn alphabetical(a: &Product, b: &Product) -> Ordering {
    a.main_category
        .cmp(&b.main_category)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

fn rank_by_tier<'a, I>(products: I, tier: fn(&Product) -> u8) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut tiered: Vec<(u8, &Product)> = products.into_iter().map(|p| (tier(p), p)).collect();
    tiered.sort_by(|(ta, a), (tb, b)| {
        ta.cmp(tb).then_with(|| {
            if *ta == REMAINDER_TIER {
                alphabetical(a, b)
            } else {
                Ordering::Equal
            }
        })
    });
    tiered.into_iter().map(|(_, p)| p.clone()).collect()
}

/// General listing order.
///
/// 1. featured + best value + bestseller
/// 2. featured + best value
/// 3. featured + bestseller
/// 4. featured
/// 5. everything else, alphabetical
#[must_use]
pub fn sort_intelligently(products: &[Product]) -> Vec<Product> {
    rank_by_tier(products, general_tier)
}

/// Best-value page order.
///
/// Same first two tiers as [`sort_intelligently`], then best value +
/// bestseller, then best value alone, then everything else alphabetical.
#[must_use]
pub fn sort_best_value(products: &[Product]) -> Vec<Product> {
    rank_by_tier(products, best_value_tier)
}

/// Featured page order: only featured products, in the first four tiers of
/// [`sort_intelligently`].
#[must_use]
pub fn sort_featured(products: &[Product]) -> Vec<Product> {
    rank_by_tier(products.iter().filter(|p| p.featured), general_tier)
}

#[cfg(test)]
#[path = "ranking_test.rs"]
mod tests;

//! Count-and-sort views over products, tags and categories.

use std::collections::{BTreeMap, BTreeSet};

use storefront_core::{normalize_tag, FeaturedPrioritized, Product};

/// How many products use a tag or category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCount {
    pub id: String,
    pub count: usize,
}

/// Products per normalized tag. A product counts once per tag.
#[must_use]
pub fn tag_counts(products: &[Product]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        let tags: BTreeSet<String> = product.tags.iter().map(|t| normalize_tag(t)).collect();
        for tag in tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    counts
}

/// Products per badge category (main plus non-distant secondaries).
#[must_use]
pub fn category_counts(products: &[Product]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        let categories: BTreeSet<&str> = product.badge_categories().collect();
        for category in categories {
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn by_count(counts: BTreeMap<String, usize>) -> Vec<UsageCount> {
    let mut usage: Vec<UsageCount> = counts
        .into_iter()
        .map(|(id, count)| UsageCount { id, count })
        .collect();
    // BTreeMap order is already by id, so a stable sort on count keeps ties alphabetical.
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage
}

/// Tag usage, most used first, ties by id.
#[must_use]
pub fn tags_by_count(products: &[Product]) -> Vec<UsageCount> {
    by_count(tag_counts(products))
}

/// Category usage, most used first, ties by id.
#[must_use]
pub fn categories_by_count(products: &[Product]) -> Vec<UsageCount> {
    by_count(category_counts(products))
}

/// Products carrying `tag`, compared after normalization, in input order.
#[must_use]
pub fn products_with_tag<'a>(products: &'a [Product], tag: &str) -> Vec<&'a Product> {
    let wanted = normalize_tag(tag);
    products
        .iter()
        .filter(|p| p.tags.iter().any(|t| normalize_tag(t) == wanted))
        .collect()
}

/// Products showing `category_id` as a badge, in input order.
#[must_use]
pub fn products_in_category<'a>(products: &'a [Product], category_id: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.badge_categories().any(|c| c == category_id))
        .collect()
}

/// Copy of `items` ordered by ascending priority, ties keeping input order.
#[must_use]
pub fn sort_by_priority<T: FeaturedPrioritized>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(FeaturedPrioritized::priority);
    sorted
}

/// Featured items only, ordered by ascending priority.
#[must_use]
pub fn featured_items<T: FeaturedPrioritized>(items: &[T]) -> Vec<T> {
    let featured: Vec<T> = items.iter().filter(|i| i.is_featured()).cloned().collect();
    sort_by_priority(&featured)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storefront_core::Category;

    use super::*;

    fn product(id: &str, main_category: &str, tags: &[&str]) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": id,
            "description": "desc",
            "price": 0.0,
            "priceDisplay": "Free",
            "priceTier": "free",
            "mainCategory": main_category,
            "secondaryCategories": [
                { "id": "bundles" },
                { "id": "archive", "distant": true }
            ],
            "tags": tags,
            "problem": { "text": "p", "points": ["p1"] },
            "agitate": { "text": "a", "points": ["a1"] },
            "solution": { "text": "s", "points": ["s1"] }
        }))
        .expect("valid product fixture")
    }

    fn category(id: &str, featured: bool, priority: i64) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            description: "d".to_string(),
            icon: None,
            color: None,
            featured,
            priority,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("a", "templates", &["No Code", "seo"]),
            product("b", "ai-tools", &["no-code", "AI"]),
            product("c", "templates", &["SEO", "ai"]),
        ]
    }

    #[test]
    fn tag_counts_use_normalized_ids() {
        let counts = tag_counts(&catalog());
        assert_eq!(counts.get("no-code"), Some(&2));
        assert_eq!(counts.get("seo"), Some(&2));
        assert_eq!(counts.get("ai"), Some(&2));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn tag_counts_count_product_once() {
        let counts = tag_counts(&[product("a", "x", &["SEO", "seo"])]);
        assert_eq!(counts.get("seo"), Some(&1));
    }

    #[test]
    fn tags_by_count_orders_by_count_then_id() {
        let mut products = catalog();
        products.push(product("d", "templates", &["seo"]));
        let usage = tags_by_count(&products);
        let order: Vec<(&str, usize)> = usage.iter().map(|u| (u.id.as_str(), u.count)).collect();
        assert_eq!(order, vec![("seo", 3), ("ai", 2), ("no-code", 2)]);
    }

    #[test]
    fn category_counts_skip_distant_secondaries() {
        let counts = category_counts(&catalog());
        assert_eq!(counts.get("templates"), Some(&2));
        assert_eq!(counts.get("ai-tools"), Some(&1));
        assert_eq!(counts.get("bundles"), Some(&3));
        assert_eq!(counts.get("archive"), None);
    }

    #[test]
    fn categories_by_count_orders_by_count() {
        let usage = categories_by_count(&catalog());
        assert_eq!(usage[0].id, "bundles");
        assert_eq!(usage[1].id, "templates");
        assert_eq!(usage[2].id, "ai-tools");
    }

    #[test]
    fn products_with_tag_matches_normalized() {
        let products = catalog();
        let found: Vec<&str> = products_with_tag(&products, "No-Code")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(found, vec!["a", "b"]);
    }

    #[test]
    fn products_in_category_uses_badges() {
        let products = catalog();
        assert_eq!(products_in_category(&products, "templates").len(), 2);
        assert_eq!(products_in_category(&products, "bundles").len(), 3);
        assert!(products_in_category(&products, "archive").is_empty());
    }

    #[test]
    fn featured_items_are_filtered_and_ordered() {
        let items = vec![
            category("c", true, 3),
            category("x", false, 21),
            category("a", true, 1),
            category("b", true, 2),
        ];
        let featured = featured_items(&items);
        let order: Vec<&str> = featured.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input_gives_empty_views() {
        assert!(tag_counts(&[]).is_empty());
        assert!(tags_by_count(&[]).is_empty());
        assert!(categories_by_count(&[]).is_empty());
        assert!(products_with_tag(&[], "seo").is_empty());
        assert!(featured_items::<Category>(&[]).is_empty());
    }
}

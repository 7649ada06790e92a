use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Faq, Identified, Testimonial};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Free,
    Budget,
    Standard,
    Premium,
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTier::Free => write!(f, "free"),
            PriceTier::Budget => write!(f, "budget"),
            PriceTier::Standard => write!(f, "standard"),
            PriceTier::Premium => write!(f, "premium"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    Yearly,
    Lifetime,
}

impl std::fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentFrequency::Monthly => write!(f, "monthly"),
            PaymentFrequency::Quarterly => write!(f, "quarterly"),
            PaymentFrequency::Yearly => write!(f, "yearly"),
            PaymentFrequency::Lifetime => write!(f, "lifetime"),
        }
    }
}

/// Association with a category other than the product's main one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryCategory {
    pub id: String,
    /// Related, but not shown as a category badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distant: Option<bool>,
}

impl SecondaryCategory {
    #[must_use]
    pub fn is_distant(&self) -> bool {
        self.distant.unwrap_or(false)
    }
}

/// One leg of the problem/agitate/solution copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyBlock {
    pub text: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systematic: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_term: Option<Vec<String>>,
}

/// A self-contained sub-offer of a product with its own checkout link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub price_display: String,
    pub purchase_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub frequencies: Vec<PaymentFrequency>,
    /// Price per billing frequency. Every key must appear in `frequencies`.
    #[serde(default)]
    pub prices: BTreeMap<PaymentFrequency, f64>,
}

/// A product's link to an FAQ or testimonial: either a bare id resolved
/// against the per-product content files, or the record itself inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryRef<T> {
    Id(String),
    Embedded(T),
}

impl<T: Identified> EntryRef<T> {
    /// The referenced id, whether bare or embedded.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            EntryRef::Id(id) => id,
            EntryRef::Embedded(entry) => entry.id(),
        }
    }

    /// The id when this is a bare reference that has to resolve elsewhere.
    #[must_use]
    pub fn as_id(&self) -> Option<&str> {
        match self {
            EntryRef::Id(id) => Some(id),
            EntryRef::Embedded(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub description: String,
    pub price: f64,
    /// Pre-formatted price, e.g. `"$29"` or `"Free"`.
    pub price_display: String,
    pub price_tier: PriceTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub main_category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_categories: Vec<SecondaryCategory>,
    pub tags: Vec<String>,
    pub problem: CopyBlock,
    pub agitate: CopyBlock,
    pub solution: CopyBlock,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub benefits: Benefits,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub best_value: bool,
    #[serde(default)]
    pub bestseller: bool,
    /// Display weight in `0..=100`; higher shows first. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default)]
    pub cross_sell_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq_ids: Option<Vec<EntryRef<Faq>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial_ids: Option<Vec<EntryRef<Testimonial>>>,
}

impl Product {
    #[must_use]
    pub fn effective_priority(&self) -> i64 {
        self.priority.unwrap_or(0)
    }

    /// Category ids shown as badges: the main category followed by every
    /// secondary category that is not marked distant.
    pub fn badge_categories(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_category.as_str()).chain(
            self.secondary_categories
                .iter()
                .filter(|c| !c.is_distant())
                .map(|c| c.id.as_str()),
        )
    }

    /// FAQ references, empty when the product has none.
    #[must_use]
    pub fn faq_refs(&self) -> &[EntryRef<Faq>] {
        self.faq_ids.as_deref().unwrap_or_default()
    }

    /// Testimonial references, empty when the product has none.
    #[must_use]
    pub fn testimonial_refs(&self) -> &[EntryRef<Testimonial>] {
        self.testimonial_ids.as_deref().unwrap_or_default()
    }
}

impl Identified for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_json() -> serde_json::Value {
        json!({
            "id": "prompt-pack",
            "name": "Prompt Pack",
            "description": "A curated pack of prompts.",
            "price": 29.0,
            "priceDisplay": "$29",
            "priceTier": "budget",
            "mainCategory": "ai-tools",
            "secondaryCategories": [
                { "id": "templates" },
                { "id": "productivity", "distant": true }
            ],
            "tags": ["AI Tools", "prompts"],
            "problem": { "text": "Blank page.", "points": ["slow starts"] },
            "agitate": { "text": "Deadlines.", "points": ["missed launches"] },
            "solution": { "text": "Prompts.", "points": ["ready to paste"] },
            "faqIds": ["faq-1", { "id": "faq-2", "question": "Q?", "answer": "A.", "order": 2 }]
        })
    }

    #[test]
    fn deserializes_with_defaults() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert!(!product.featured);
        assert!(!product.best_value);
        assert!(!product.bestseller);
        assert_eq!(product.priority, None);
        assert_eq!(product.effective_priority(), 0);
        assert!(product.cross_sell_ids.is_empty());
        assert!(product.testimonial_refs().is_empty());
        assert_eq!(product.price_tier, PriceTier::Budget);
    }

    #[test]
    fn badge_categories_skip_distant_secondaries() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        let badges: Vec<&str> = product.badge_categories().collect();
        assert_eq!(badges, vec!["ai-tools", "templates"]);
    }

    #[test]
    fn entry_refs_accept_ids_and_embedded_records() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        let refs = product.faq_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].as_id(), Some("faq-1"));
        assert_eq!(refs[1].as_id(), None);
        assert_eq!(refs[1].id(), "faq-2");
    }

    #[test]
    fn camel_case_flags_roundtrip() {
        let mut value = product_json();
        value["bestValue"] = json!(true);
        value["priority"] = json!(40);
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.best_value);
        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["bestValue"], json!(true));
        assert_eq!(out["priority"], json!(40));
        assert!(out.get("variants").is_none());
    }

    #[test]
    fn display_enums() {
        assert_eq!(PriceTier::Premium.to_string(), "premium");
        assert_eq!(PaymentFrequency::Yearly.to_string(), "yearly");
    }
}

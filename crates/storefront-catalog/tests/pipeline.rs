//! Raw JSON through schema validation, integrity, priorities and ranking.

use serde_json::{json, Value};
use storefront_catalog::{
    auto_renumber, calculate_stats, check_references, group_relationship_errors, sort_featured,
    sort_intelligently, tags_by_count, validate_priorities, ReferenceField,
};
use storefront_core::{
    validate_categories, validate_faqs, validate_products, validate_tag_map_strict,
    validate_testimonials, CatalogUniverse, RenumberConfig,
};

fn universe() -> CatalogUniverse {
    CatalogUniverse::new(["templates", "ai-tools"], ["no-code", "seo", "prompts"])
}

fn product(id: &str, main_category: &str, tags: Value, extra: Value) -> Value {
    let mut raw = json!({
        "id": id,
        "name": id.replace('-', " "),
        "description": "A product.",
        "price": 19.0,
        "priceDisplay": "$19",
        "priceTier": "budget",
        "mainCategory": main_category,
        "tags": tags,
        "problem": { "text": "p", "points": ["p1"] },
        "agitate": { "text": "a", "points": ["a1"] },
        "solution": { "text": "s", "points": ["s1"] }
    });
    if let (Some(obj), Some(extra)) = (raw.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            obj.insert(k.clone(), v.clone());
        }
    }
    raw
}

fn raw_products() -> Value {
    json!([
        product(
            "launch-kit",
            "templates",
            json!(["No Code", "SEO"]),
            json!({ "featured": true, "bestseller": true, "crossSellIds": ["prompt-pack"],
                    "faqIds": ["kit-refunds"], "testimonialIds": ["t-dana"] })
        ),
        product(
            "prompt-pack",
            "ai-tools",
            json!(["prompts"]),
            json!({ "featured": true, "bestValue": true, "bestseller": true, "priority": 90 })
        ),
        product("seo-audit", "templates", json!(["seo"]), json!({})),
    ])
}

fn tag(id: &str, featured: bool, priority: i64) -> Value {
    json!({ "id": id, "name": id, "description": "d", "featured": featured, "priority": priority })
}

#[test]
fn clean_snapshot_passes_every_stage() {
    let universe = universe();

    let products = validate_products(&raw_products()).unwrap();
    assert!(products.is_clean(), "{:?}", products.failures);

    let categories = validate_categories(
        &json!([
            { "id": "templates", "name": "Templates", "description": "d", "featured": true, "priority": 1 },
            { "id": "ai-tools", "name": "AI Tools", "description": "d", "priority": 11 }
        ]),
        &universe,
    )
    .unwrap();
    assert!(categories.is_clean());

    let tags = validate_tag_map_strict(
        &json!({
            "no-code": tag("no-code", true, 1),
            "seo": tag("seo", false, 30),
            "prompts": tag("prompts", false, 21)
        }),
        &universe,
    )
    .unwrap();
    assert!(tags.is_clean());

    let faqs = validate_faqs(&json!([
        { "id": "kit-refunds", "question": "Refunds?", "answer": "Yes.", "order": 0 }
    ]))
    .unwrap();
    let testimonials = validate_testimonials(&json!([
        { "id": "t-dana", "author": "Dana", "rating": 5, "quote": "Great." }
    ]))
    .unwrap();

    let references = check_references(
        &products.valid,
        &categories.valid,
        &tags.valid,
        &testimonials.valid,
        &faqs.valid,
    );
    assert!(references.success, "{:?}", references.errors);
    assert!(references.orphans.is_empty());

    let tag_config = RenumberConfig::new(1, 20, 21);
    let stats = calculate_stats(&tags.valid, &tag_config);
    assert!(stats.has_priority_gaps);
    let renumbered = auto_renumber(&tags.valid, &tag_config);
    assert!(!calculate_stats(&renumbered, &tag_config).has_priority_gaps);
    assert!(validate_priorities(&renumbered, &tag_config).success);
    let order: Vec<(&str, i64)> = renumbered
        .iter()
        .map(|t| (t.id.as_str(), t.priority))
        .collect();
    assert_eq!(order, vec![("no-code", 1), ("prompts", 21), ("seo", 22)]);

    let ranked = sort_intelligently(&products.valid);
    let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["prompt-pack", "launch-kit", "seo-audit"]);
    assert_eq!(sort_featured(&products.valid).len(), 2);

    let usage = tags_by_count(&products.valid);
    assert_eq!(usage[0].id, "seo");
    assert_eq!(usage[0].count, 2);
}

#[test]
fn dangling_references_are_grouped_per_product() {
    let mut raw = raw_products();
    raw[0]["crossSellIds"] = json!(["prompt-pack", "ghost"]);
    raw[2]["mainCategory"] = json!("courses");

    let products = validate_products(&raw).unwrap();
    let categories = validate_categories(
        &json!([
            { "id": "templates", "name": "Templates", "description": "d", "priority": 11 },
            { "id": "ai-tools", "name": "AI Tools", "description": "d", "priority": 12 }
        ]),
        &universe(),
    )
    .unwrap();
    let tags = validate_tag_map_strict(
        &json!({
            "no-code": tag("no-code", false, 21),
            "seo": tag("seo", false, 22),
            "prompts": tag("prompts", false, 23)
        }),
        &universe(),
    )
    .unwrap();

    let references = check_references(&products.valid, &categories.valid, &tags.valid, &[], &[]);
    assert!(!references.success);

    let fields: Vec<ReferenceField> = references.errors.iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec![
            ReferenceField::CrossSellIds,
            ReferenceField::TestimonialIds,
            ReferenceField::FaqIds,
            ReferenceField::MainCategory,
        ]
    );

    let groups = group_relationship_errors(&references.errors);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].entity, "launch-kit");
    assert_eq!(groups[0].lines.len(), 3);
    assert!(groups[0].lines[0].starts_with("crossSellIds: "));
    assert_eq!(groups[1].entity, "seo-audit");
}

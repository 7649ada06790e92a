use serde_json::json;

use super::*;

fn universe() -> CatalogUniverse {
    CatalogUniverse::new(["ai-tools", "templates"], ["automation", "no-code", "seo"])
}

fn tag_json(id: &str, priority: i64) -> Value {
    json!({
        "id": id,
        "name": id.to_uppercase(),
        "description": format!("All about {id}"),
        "color": "#10b981",
        "featured": false,
        "priority": priority
    })
}

// -----------------------------------------------------------------------
// categories
// -----------------------------------------------------------------------

#[test]
fn category_accepts_universe_id() {
    let category = validate_category(
        &json!({
            "id": "ai-tools",
            "name": "AI Tools",
            "description": "Tools powered by models",
            "icon": "sparkles",
            "featured": true,
            "priority": 1
        }),
        &universe(),
    )
    .unwrap();
    assert!(category.featured);
    assert_eq!(category.priority, 1);
}

#[test]
fn category_rejects_id_outside_universe() {
    let errors = validate_category(
        &json!({
            "id": "courses",
            "name": "Courses",
            "description": "Video courses",
            "priority": 3
        }),
        &universe(),
    )
    .unwrap_err();
    assert_eq!(errors.issues()[0].path, "id");
    assert!(errors.to_string().contains("not a known category id"));
}

#[test]
fn category_missing_priority_is_required() {
    let errors = validate_category(
        &json!({ "id": "templates", "name": "Templates", "description": "Docs" }),
        &universe(),
    )
    .unwrap_err();
    assert_eq!(errors.to_string(), "priority: is required");
}

#[test]
fn categories_collection_continues_past_bad_records() {
    let report = validate_categories(
        &json!([
            { "id": "ai-tools", "name": "", "description": "x", "priority": 1 },
            { "id": "templates", "name": "Templates", "description": "Docs", "priority": -2 },
            { "id": "ai-tools", "name": "AI", "description": "again", "priority": 4 }
        ]),
        &universe(),
    )
    .unwrap();
    assert_eq!(report.valid.len(), 1);
    assert_eq!(report.valid[0].name, "AI");
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.issue_count(), 2);
}

// -----------------------------------------------------------------------
// tags
// -----------------------------------------------------------------------

#[test]
fn tag_rejects_bad_id_and_color() {
    let mut raw = tag_json("No Code", 1);
    raw["color"] = json!("green");
    let errors = validate_tag(&raw).unwrap_err();
    let paths: Vec<&str> = errors.issues().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["id", "color"]);
}

#[test]
fn tag_color_is_optional() {
    let mut raw = tag_json("seo", 1);
    raw.as_object_mut().unwrap().remove("color");
    assert!(validate_tag(&raw).is_ok());
}

#[test]
fn tag_map_accepts_any_subset() {
    let report = validate_tag_map(&json!({
        "seo": tag_json("seo", 21),
        "growth": tag_json("growth", 22)
    }))
    .unwrap();
    assert!(report.is_clean());
    assert_eq!(report.valid.len(), 2);
}

#[test]
fn tag_map_requires_key_to_match_id() {
    let report = validate_tag_map(&json!({ "seo": tag_json("automation", 1) })).unwrap();
    assert!(report.valid.is_empty());
    assert_eq!(report.failures[0].entity, "seo");
    assert!(report.failures[0]
        .errors
        .to_string()
        .contains("does not match map key 'seo'"));
}

#[test]
fn tag_map_rejects_array_top_level() {
    let err = validate_tag_map(&json!([tag_json("seo", 1)])).unwrap_err();
    assert!(matches!(err, SchemaError::ExpectedObject { found: "array", .. }));
}

#[test]
fn strict_tag_map_requires_every_universe_id() {
    let report = validate_tag_map_strict(
        &json!({
            "automation": tag_json("automation", 1),
            "seo": tag_json("seo", 21)
        }),
        &universe(),
    )
    .unwrap();
    assert_eq!(report.valid.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entity, "no-code");
    assert!(report.failures[0].errors.to_string().contains("missing entry"));
}

#[test]
fn strict_tag_map_rejects_unknown_keys() {
    let report = validate_tag_map_strict(
        &json!({
            "automation": tag_json("automation", 1),
            "no-code": tag_json("no-code", 2),
            "seo": tag_json("seo", 21),
            "crypto": tag_json("crypto", 22)
        }),
        &universe(),
    )
    .unwrap();
    assert_eq!(report.valid.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entity, "crypto");
    assert!(report.failures[0]
        .errors
        .to_string()
        .contains("not part of the tag universe"));
}

#[test]
fn strict_tag_map_accepts_complete_map() {
    let report = validate_tag_map_strict(
        &json!({
            "automation": tag_json("automation", 1),
            "no-code": tag_json("no-code", 2),
            "seo": tag_json("seo", 21)
        }),
        &universe(),
    )
    .unwrap();
    assert!(report.is_clean());
}

#[test]
fn category_priority_of_wrong_type_names_the_field() {
    let errors = validate_category(
        &json!({
            "id": "templates",
            "name": "",
            "description": "Docs",
            "priority": "first"
        }),
        &universe(),
    )
    .unwrap_err();
    let paths: Vec<&str> = errors.issues().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["priority", "name"]);
    assert!(errors.issues()[0].message.contains("invalid type"), "{errors}");
}

#[test]
fn tag_map_entry_type_errors_keep_their_path() {
    let mut raw = tag_json("seo", 1);
    raw["featured"] = json!("yes");
    let report = validate_tag_map(&json!({ "seo": raw })).unwrap();
    assert_eq!(report.failures[0].entity, "seo");
    assert_eq!(report.failures[0].errors.issues()[0].path, "featured");
}

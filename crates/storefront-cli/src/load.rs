//! Reading and writing the JSON snapshot under the data directory.
//!
//! Layout:
//!
//! ```text
//! data/
//!   products.json            array of products
//!   categories.json          array of categories
//!   tags.json                object keyed by tag id
//!   faqs/<product-id>.json   array of FAQs for one product
//!   testimonials/<product-id>.json
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

pub(crate) const PRODUCTS_FILE: &str = "products.json";
pub(crate) const CATEGORIES_FILE: &str = "categories.json";
pub(crate) const TAGS_FILE: &str = "tags.json";
const FAQS_DIR: &str = "faqs";
const TESTIMONIALS_DIR: &str = "testimonials";

/// JSON for one product's FAQ or testimonial file.
#[derive(Debug)]
pub(crate) struct ProductFile {
    pub product_id: String,
    pub value: Value,
}

/// Every collection as parsed JSON, before schema validation.
#[derive(Debug)]
pub(crate) struct RawSnapshot {
    pub products: Value,
    pub categories: Value,
    pub tags: Value,
    pub faqs: Vec<ProductFile>,
    pub testimonials: Vec<ProductFile>,
}

pub(crate) fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let mut content = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    content.push('\n');
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote file");
    Ok(())
}

/// Read every `*.json` file in `dir`, keyed by file stem. A missing directory
/// yields no files.
fn read_product_files(dir: &Path) -> anyhow::Result<Vec<ProductFile>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "content directory not present");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read an entry of {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(product_id) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping file with non-UTF-8 name");
            continue;
        };
        files.push(ProductFile {
            product_id: product_id.to_string(),
            value: read_json(&path)?,
        });
    }
    Ok(files)
}

pub(crate) fn load_raw_snapshot(data_dir: &Path) -> anyhow::Result<RawSnapshot> {
    let snapshot = RawSnapshot {
        products: read_json(&data_dir.join(PRODUCTS_FILE))?,
        categories: read_json(&data_dir.join(CATEGORIES_FILE))?,
        tags: read_json(&data_dir.join(TAGS_FILE))?,
        faqs: read_product_files(&data_dir.join(FAQS_DIR))?,
        testimonials: read_product_files(&data_dir.join(TESTIMONIALS_DIR))?,
    };
    tracing::debug!(
        data_dir = %data_dir.display(),
        faq_files = snapshot.faqs.len(),
        testimonial_files = snapshot.testimonials.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

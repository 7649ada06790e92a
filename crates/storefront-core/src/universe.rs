use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::schema::checks::is_slug;
use crate::ConfigError;

/// The closed set of category and tag ids a catalog may use.
///
/// Loaded from `config/catalog.yaml` and passed explicitly to the schema
/// validators, so tests can build their own universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogUniverse {
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl CatalogUniverse {
    #[must_use]
    pub fn new<C, T>(categories: C, tags: T) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn has_category(&self, id: &str) -> bool {
        self.categories.contains(id)
    }

    #[must_use]
    pub fn has_tag(&self, id: &str) -> bool {
        self.tags.contains(id)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<String>,
    tags: Vec<String>,
}

/// Load and validate the catalog universe from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_universe(path: &Path) -> Result<CatalogUniverse, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_universe(&content)
}

fn parse_universe(content: &str) -> Result<CatalogUniverse, ConfigError> {
    let file: CatalogFile = serde_yaml::from_str(content)?;

    validate_ids("category", &file.categories)?;
    validate_ids("tag", &file.tags)?;

    Ok(CatalogUniverse::new(file.categories, file.tags))
}

fn validate_ids(kind: &str, ids: &[String]) -> Result<(), ConfigError> {
    if ids.is_empty() {
        return Err(ConfigError::Validation(format!(
            "catalog must declare at least one {kind} id"
        )));
    }

    let mut seen = BTreeSet::new();
    for id in ids {
        if !is_slug(id) {
            return Err(ConfigError::Validation(format!(
                "{kind} id '{id}' must be lowercase letters, digits, and single hyphens"
            )));
        }
        if !seen.insert(id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {kind} id: '{id}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_catalog() {
        let universe = parse_universe(
            "categories: [ai-tools, templates]\ntags: [automation, no-code, seo]\n",
        )
        .unwrap();
        assert!(universe.has_category("ai-tools"));
        assert!(universe.has_tag("no-code"));
        assert!(!universe.has_tag("templates"));
        assert_eq!(universe.tags.len(), 3);
    }

    #[test]
    fn rejects_empty_category_list() {
        let err = parse_universe("categories: []\ntags: [seo]\n").unwrap_err();
        assert!(err.to_string().contains("at least one category id"));
    }

    #[test]
    fn rejects_duplicate_tag() {
        let err = parse_universe("categories: [a]\ntags: [seo, seo]\n").unwrap_err();
        assert!(err.to_string().contains("duplicate tag id: 'seo'"));
    }

    #[test]
    fn rejects_malformed_id() {
        let err = parse_universe("categories: [AI Tools]\ntags: [seo]\n").unwrap_err();
        assert!(err.to_string().contains("'AI Tools'"));
    }

    #[test]
    fn rejects_missing_key() {
        let err = parse_universe("categories: [a]\n").unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileParse(_)));
    }

    #[test]
    fn load_universe_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("catalog.yaml");
        let result = load_universe(&path);
        assert!(result.is_ok(), "failed to load catalog.yaml: {result:?}");
        let universe = result.unwrap();
        assert!(!universe.categories.is_empty());
        assert!(!universe.tags.is_empty());
    }

    #[test]
    fn load_universe_reports_missing_file() {
        let err = load_universe(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
    }
}

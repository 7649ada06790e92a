use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Priority layout for a featured/non-featured collection.
///
/// Featured items occupy `[featured_start, non_featured_start)`; everything
/// else starts at `non_featured_start`. `featured_end` is the last slot an
/// editor is expected to hand out to featured items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenumberConfig {
    pub featured_start: i64,
    pub featured_end: i64,
    pub non_featured_start: i64,
}

impl RenumberConfig {
    /// Largest accepted bound. Renumbering counts upward from a start value,
    /// so bounds stay far below `i64::MAX`.
    pub const MAX_BOUND: i64 = 1_000_000;

    #[must_use]
    pub const fn new(featured_start: i64, featured_end: i64, non_featured_start: i64) -> Self {
        Self {
            featured_start,
            featured_end,
            non_featured_start,
        }
    }

    /// Check that the three bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` unless
    /// `0 <= featured_start <= featured_end < non_featured_start <= MAX_BOUND`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.featured_start < 0 {
            return Err(ConfigError::Validation(format!(
                "featured start {} must not be negative",
                self.featured_start
            )));
        }
        if self.featured_start > self.featured_end {
            return Err(ConfigError::Validation(format!(
                "featured start {} is after featured end {}",
                self.featured_start, self.featured_end
            )));
        }
        if self.featured_end >= self.non_featured_start {
            return Err(ConfigError::Validation(format!(
                "featured end {} must be below non-featured start {}",
                self.featured_end, self.non_featured_start
            )));
        }
        if self.non_featured_start > Self::MAX_BOUND {
            return Err(ConfigError::Validation(format!(
                "non-featured start {} exceeds {}",
                self.non_featured_start,
                Self::MAX_BOUND
            )));
        }
        Ok(())
    }

    /// Number of priority slots reserved for featured items.
    #[must_use]
    pub fn featured_capacity(&self) -> i64 {
        self.non_featured_start - self.featured_start
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub tag_priorities: RenumberConfig,
    pub category_priorities: RenumberConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renumber_config_accepts_ordered_bounds() {
        assert!(RenumberConfig::new(1, 20, 21).validate().is_ok());
        assert!(RenumberConfig::new(1, 1, 2).validate().is_ok());
    }

    #[test]
    fn renumber_config_rejects_start_after_end() {
        let err = RenumberConfig::new(5, 4, 21).validate().unwrap_err();
        assert!(err.to_string().contains("featured start 5"));
    }

    #[test]
    fn renumber_config_rejects_overlapping_partitions() {
        let err = RenumberConfig::new(1, 21, 21).validate().unwrap_err();
        assert!(err.to_string().contains("non-featured start 21"));
    }

    #[test]
    fn renumber_config_rejects_bounds_near_integer_limit() {
        let err = RenumberConfig::new(1, 20, i64::MAX).validate().unwrap_err();
        assert!(err.to_string().contains("exceeds 1000000"), "{err}");
        assert!(RenumberConfig::new(1, 20, RenumberConfig::MAX_BOUND)
            .validate()
            .is_ok());
    }

    #[test]
    fn renumber_config_rejects_negative_start() {
        let err = RenumberConfig::new(-1, 20, 21).validate().unwrap_err();
        assert!(err.to_string().contains("must not be negative"), "{err}");
    }

    #[test]
    fn featured_capacity_spans_to_non_featured_start() {
        assert_eq!(RenumberConfig::new(1, 20, 21).featured_capacity(), 20);
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Test.to_string(), "test");
        assert_eq!(Environment::Production.to_string(), "production");
    }
}

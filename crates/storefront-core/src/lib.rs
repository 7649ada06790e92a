pub mod app_config;
pub mod config;
pub mod entities;
pub mod normalize;
pub mod schema;
pub mod universe;

pub use app_config::{AppConfig, Environment, RenumberConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use entities::{
    Benefits, Category, CopyBlock, EntryRef, Faq, FeaturedPrioritized, Identified,
    PaymentFrequency, PriceTier, Product, SecondaryCategory, Subscription, Tag, Testimonial,
    Variant,
};
pub use normalize::normalize_tag;
pub use schema::{
    validate_categories, validate_category, validate_faq, validate_faqs, validate_product,
    validate_products, validate_tag, validate_tag_map, validate_tag_map_strict,
    validate_testimonial, validate_testimonials, CollectionReport, EntityFailure, FieldIssue,
    SchemaError, ValidationErrors,
};
pub use universe::{load_universe, CatalogUniverse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}

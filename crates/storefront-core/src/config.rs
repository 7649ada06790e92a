use crate::app_config::{AppConfig, Environment, RenumberConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let renumber = |prefix: &str,
                    defaults: (&str, &str, &str)|
     -> Result<RenumberConfig, ConfigError> {
        let config = RenumberConfig::new(
            parse_i64(&format!("{prefix}_FEATURED_START"), defaults.0)?,
            parse_i64(&format!("{prefix}_FEATURED_END"), defaults.1)?,
            parse_i64(&format!("{prefix}_NON_FEATURED_START"), defaults.2)?,
        );
        config.validate().map_err(|e| ConfigError::InvalidEnvVar {
            var: format!("{prefix}_*"),
            reason: e.to_string(),
        })?;
        Ok(config)
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("STOREFRONT_DATA_DIR", "./data"));
    let catalog_path = PathBuf::from(or_default(
        "STOREFRONT_CATALOG_PATH",
        "./config/catalog.yaml",
    ));

    let tag_priorities = renumber("STOREFRONT_TAG", ("1", "20", "21"))?;
    let category_priorities = renumber("STOREFRONT_CATEGORY", ("1", "10", "11"))?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        catalog_path,
        tag_priorities,
        category_priorities,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

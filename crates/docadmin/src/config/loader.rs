use std::path::{Path, PathBuf};

use crate::config::schema::{Config, DatabaseBackend};
use crate::error::ConfigError;
use crate::secrets::has_secret_source;

const SCHEMA_JSON: &str = include_str!("config-v1.schema.json");

/// Returns the canonical config path: `~/.docadmin/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".docadmin").join("config.json"))
}

/// Loads a config file. `.yaml`/`.yml` files are parsed as YAML, anything
/// else as JSON.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        load_config_from_yaml_str(&content)
    } else {
        load_config_from_str(&content)
    }
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;
    load_config_from_value(json_value)
}

pub fn load_config_from_yaml_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_yaml::from_str(content)?;
    load_config_from_value(json_value)
}

fn load_config_from_value(json_value: serde_json::Value) -> Result<Config, ConfigError> {
    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    log::debug!(
        "Loaded config for {:?} database '{}'",
        config.database.backend,
        config.database.service
    );

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let database = &config.database;
    if database.pool.size == 0 {
        return Err(ConfigError::Validation {
            message: "database.pool.size must be at least 1".to_string(),
        });
    }

    if database.backend == DatabaseBackend::Postgres {
        if database.port == 0 {
            return Err(ConfigError::Validation {
                message: "database.port must be non-zero".to_string(),
            });
        }
        if database.user.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::Validation {
                message: "database.user is required for the postgres backend".to_string(),
            });
        }
        if !has_secret_source(
            database.password.as_deref(),
            database.password_file.as_deref(),
            database.password_env_var.as_deref(),
        ) {
            log::warn!("No database password configured; relying on server-side auth");
        }
    }

    // bcrypt only accepts costs in this range.
    let cost = config.security.bcrypt_cost;
    if !(4..=31).contains(&cost) {
        return Err(ConfigError::Validation {
            message: format!("security.bcrypt_cost must be between 4 and 31, got {}", cost),
        });
    }

    Ok(())
}

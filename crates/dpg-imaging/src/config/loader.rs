use std::path::Path;

use crate::config::schema::ImagingConfig;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ImagingConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ImagingConfig, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: ImagingConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

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

fn validate_config(config: &ImagingConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let naming = &config.naming;
    for (name, width) in [
        ("unit_pad_width", naming.unit_pad_width),
        ("page_pad_width", naming.page_pad_width),
    ] {
        if !(1..=9).contains(&width) {
            return Err(ConfigError::Validation {
                message: format!("{} must be between 1 and 9, got {}", name, width),
            });
        }
    }

    // The extension is matched case-insensitively and written lowercase.
    if naming.master_extension.is_empty()
        || !naming
            .master_extension
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ConfigError::Validation {
            message: format!(
                "master_extension must be alphanumeric without a leading dot, got '{}'",
                naming.master_extension
            ),
        });
    }

    if config.view.page_size == 0 || config.view.search_page_size == 0 {
        return Err(ConfigError::Validation {
            message: "Page sizes must be greater than zero".to_string(),
        });
    }

    Ok(())
}

//! Loading field types and reserved names from configuration files.
//!
//! A config file is JSON or YAML:
//!
//! ```yaml
//! schema:
//!   order_by: sort
//! types:
//!   amount: int
//!   created_at: datetime
//!   item_id: uuid
//! ```
//!
//! Both sections are optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::schema::ParsingSchema;
use crate::value::TypesMap;

/// Errors that can occur while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not one of `json`, `yaml`, `yml`.
    #[error("Unsupported config format '{0}' (expected json, yaml or yml)")]
    UnsupportedFormat(String),
}

/// Reserved names plus field types, as loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationConfig {
    pub schema: ParsingSchema,
    pub types: TypesMap,
}

impl NotationConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads a config file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match extension.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldType;
    use std::io::Write;

    #[test]
    fn yaml_config() {
        let config = NotationConfig::from_yaml_str(
            "schema:\n  order_by: sort\ntypes:\n  amount: int\n  price: money\n",
        )
        .unwrap();
        assert_eq!(config.schema.order_by, "sort");
        assert_eq!(config.schema.limit, "limit");
        assert_eq!(config.types.get("amount"), Some(&FieldType::Int));
        assert_eq!(
            config.types.get("price"),
            Some(&FieldType::Custom("money".into()))
        );
    }

    #[test]
    fn json_config_without_schema() {
        let config =
            NotationConfig::from_json_str(r#"{ "types": { "created_at": "datetime" } }"#).unwrap();
        assert_eq!(config.schema, ParsingSchema::default());
        assert_eq!(config.types.get("created_at"), Some(&FieldType::DateTime));
    }

    #[test]
    fn from_path_uses_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "types:\n  is_active: bool").unwrap();

        let config = NotationConfig::from_path(file.path()).unwrap();
        assert_eq!(config.types.get("is_active"), Some(&FieldType::Bool));
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            NotationConfig::from_path(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn from_path_reports_missing_file() {
        assert!(matches!(
            NotationConfig::from_path("/nonexistent/notation.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}

//! Configuration schema (tabledrift.toml)

use serde::{Deserialize, Serialize};

fn default_environment() -> String {
    "prd".to_string()
}

fn default_ddl_bucket() -> String {
    "warehouse-ddl".to_string()
}

fn default_reference_prefix() -> String {
    "database/ddl/hive".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Deployment environment tag, e.g. `prd` or `uat`
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Bucket holding the reference DDL files
    #[serde(default = "default_ddl_bucket")]
    pub ddl_bucket: String,

    /// Key prefix under which reference DDL files live
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            ddl_bucket: default_ddl_bucket(),
            reference_prefix: default_reference_prefix(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to a TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))
    }

    /// Object-store path of the reference DDL for a table
    ///
    /// Layout: `s3://{bucket}/{prefix}/{schema}/{table}.sql`
    pub fn reference_path_for(&self, schema_name: &str, table_name: &str) -> String {
        format!(
            "s3://{}/{}/{}/{}.sql",
            self.ddl_bucket, self.reference_prefix, schema_name, table_name
        )
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.environment, "prd");
        assert_eq!(
            config.reference_path_for("sales", "orders"),
            "s3://warehouse-ddl/database/ddl/hive/sales/orders.sql"
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = Config::from_toml("ddl_bucket = \"acme.prd.us-east-1\"").unwrap();
        assert_eq!(config.ddl_bucket, "acme.prd.us-east-1");
        assert_eq!(config.reference_prefix, "database/ddl/hive");
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("ddl_bucket = ["),
            Err(ConfigError::ParseError(_))
        ));
    }
}

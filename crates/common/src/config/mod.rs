//! Configuration management for SAP
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with SAP__)
//! - Configuration files (config/default.toml, config/{SAP_ENV}.toml, config/local.toml)
//! - An explicit file passed on the command line
//! - Default values
//!
//! The file/environment layer ([`AppConfig`]) keeps the raw integer limits
//! users type. They are converted to [`ClassifierConfig`] exactly once, which
//! is the only place the "zero or negative means unlimited" convention lives.

mod count;

pub use count::Count;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DEFAULT_DOI_RESOLVER;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Classification limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Report and export configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Raw limits as typed by the user.
///
/// `None`, zero and negative values all mean "unlimited".
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    pub max_roots: Option<i64>,
    pub max_trunk: Option<i64>,
    pub max_leaves: Option<i64>,
    pub max_leaf_age: Option<i64>,
    pub min_leaf_connections: Option<i64>,

    /// Discard papers outside the selected roles
    #[serde(default = "default_clear_graph")]
    pub clear_graph: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Prefix used to turn a DOI into a URL
    #[serde(default = "default_doi_resolver")]
    pub doi_resolver: String,
}

// Default value functions
fn default_clear_graph() -> bool { true }
fn default_log_level() -> String { "warn".to_string() }
fn default_doi_resolver() -> String { DEFAULT_DOI_RESOLVER.to_string() }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_roots: None,
            max_trunk: None,
            max_leaves: None,
            max_leaf_age: None,
            min_leaf_connections: None,
            clear_graph: default_clear_graph(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            doi_resolver: default_doi_resolver(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// `extra` is an explicit file (usually `--config`) layered on top of the
    /// conventional `config/` files and below the environment.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("SAP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Load from environment variables with SAP__ prefix
            // e.g., SAP__LIMITS__MAX_ROOTS=10
            .add_source(
                Environment::with_prefix("SAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Build the classifier configuration
    pub fn classifier_config(&self) -> ClassifierConfig {
        self.limits.to_classifier_config()
    }
}

impl LimitsConfig {
    /// Convert the raw limits, applying the unlimited convention
    pub fn to_classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            max_roots: Count::from_cli(self.max_roots),
            max_trunk: Count::from_cli(self.max_trunk),
            max_leaves: Count::from_cli(self.max_leaves),
            max_leaf_age: Count::from_cli(self.max_leaf_age),
            min_leaf_connections: Count::from_cli(self.min_leaf_connections),
            clear_graph: self.clear_graph,
        }
    }
}

/// Limits applied by the classifier
///
/// Built once per invocation and owned by the classifier; every graph of a
/// collection is classified under the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum number of roots kept
    pub max_roots: Count,

    /// Maximum number of trunk papers kept
    pub max_trunk: Count,

    /// Maximum number of leaves kept
    pub max_leaves: Count,

    /// Maximum age of a leaf, in years, relative to the newest paper
    pub max_leaf_age: Count,

    /// Minimum number of root paths required for a leaf
    pub min_leaf_connections: Count,

    /// Drop papers outside every selected role
    pub clear_graph: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_roots: Count::Unlimited,
            max_trunk: Count::Unlimited,
            max_leaves: Count::Unlimited,
            max_leaf_age: Count::Unlimited,
            min_leaf_connections: Count::Unlimited,
            clear_graph: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.limits.clear_graph);
        assert_eq!(config.observability.log_level, "warn");
        assert_eq!(config.output.doi_resolver, "https://dx.doi.org/");
    }

    #[test]
    fn test_default_limits_are_unlimited() {
        let config = AppConfig::default().classifier_config();
        assert_eq!(config, ClassifierConfig::default());
        assert!(config.max_roots.is_unlimited());
        assert!(config.clear_graph);
    }

    #[test]
    fn test_non_positive_limits_become_unlimited() {
        let limits = LimitsConfig {
            max_roots: Some(10),
            max_trunk: Some(0),
            max_leaves: Some(-1),
            max_leaf_age: Some(7),
            min_leaf_connections: None,
            clear_graph: false,
        };
        let config = limits.to_classifier_config();
        assert_eq!(config.max_roots, Count::Bounded(10));
        assert_eq!(config.max_trunk, Count::Unlimited);
        assert_eq!(config.max_leaves, Count::Unlimited);
        assert_eq!(config.max_leaf_age, Count::Bounded(7));
        assert_eq!(config.min_leaf_connections, Count::Unlimited);
        assert!(!config.clear_graph);
    }

    #[test]
    fn test_deserialize_partial_limits() {
        let limits: LimitsConfig =
            serde_json::from_str(r#"{ "max_leaves": 60, "max_leaf_age": 7 }"#).unwrap();
        assert_eq!(limits.max_leaves, Some(60));
        assert_eq!(limits.max_roots, None);
        assert!(limits.clear_graph);
    }
}

//! Builder configuration, loadable from YAML

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Knobs for how sentences and mentions become graph elements
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// strict_layers: true
/// default_document_id: corpus-a
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Also register each token's entity tag as its `default` label
    pub entity_as_default: bool,
    /// Fail when a token layer is shorter than the `word` field,
    /// instead of skipping the missing positions
    pub strict_layers: bool,
    /// Document id used in dependency link ids when the input has none
    pub default_document_id: String,
    /// Relation type for mentions when neither mention nor document names one
    pub default_relation: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            entity_as_default: true,
            strict_layers: false,
            default_document_id: "doc-0".to_string(),
            default_relation: "mention".to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_as_default(mut self, enabled: bool) -> Self {
        self.entity_as_default = enabled;
        self
    }

    pub fn with_strict_layers(mut self, strict: bool) -> Self {
        self.strict_layers = strict;
        self
    }

    pub fn with_default_document_id(mut self, id: impl Into<String>) -> Self {
        self.default_document_id = id.into();
        self
    }

    pub fn with_default_relation(mut self, relation: impl Into<String>) -> Self {
        self.default_relation = relation.into();
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

//! Front-end configuration
//!
//! Every field has a default, so an empty document is a valid configuration and
//! callers only spell out what they change:
//!
//! ```yaml
//! parse:
//!   recover: false
//! analysis:
//!   suggestions: true
//!   attributes:
//!     - { object: request, attribute: ip, category: categorical }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::spl::semantic::{Analyzer, AttributeRegistry, Category};

/// Top-level configuration consumed by [`crate::spl::pipeline::compile`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parse: ParseOptions,
    pub analysis: AnalysisOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Skip malformed declarations instead of stopping at the first one
    pub recover: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { recover: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisOptions {
    pub suggestions: bool,
    /// Added on top of the built-in attribute registry
    pub attributes: Vec<AttributeSpec>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            suggestions: true,
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSpec {
    pub object: String,
    pub attribute: String,
    pub category: Category,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The analyzer these options describe
    pub fn analyzer(&self) -> Analyzer {
        self.analysis.analyzer()
    }
}

impl AnalysisOptions {
    pub fn registry(&self) -> AttributeRegistry {
        let mut registry = AttributeRegistry::default();
        for spec in &self.attributes {
            registry.insert(&spec.object, &spec.attribute, spec.category);
        }
        registry
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::with_registry(self.registry()).suggestions(self.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spl::semantic::Lookup;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.parse.recover);
        assert!(config.analysis.suggestions);
        assert!(config.analysis.attributes.is_empty());
        assert_eq!(Config::from_yaml_str("").unwrap(), config);
        assert_eq!(Config::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml_str("parse:\n  recover: false\n").unwrap();
        assert!(!config.parse.recover);
        assert!(config.analysis.suggestions);
    }

    #[test]
    fn test_extra_attributes() {
        let config = Config::from_yaml_str(
            "analysis:\n  attributes:\n    - { object: request, attribute: ip, category: categorical }\n    - { object: time, attribute: second, category: numeric }\n",
        )
        .unwrap();
        let registry = config.analysis.registry();
        assert_eq!(registry.lookup("request", "ip"), Lookup::Found(Category::Categorical));
        assert_eq!(registry.lookup("time", "second"), Lookup::Found(Category::Numeric));
        assert_eq!(registry.lookup("time", "hour"), Lookup::Found(Category::Numeric));
    }

    #[test]
    fn test_json() {
        let config = Config::from_json_str(r#"{"analysis": {"suggestions": false}}"#).unwrap();
        assert!(!config.analysis.suggestions);
        assert!(config.parse.recover);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            Config::from_yaml_str("parse:\n  recover: maybe\n"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{"analysis": {"attributes": [{"object": "a", "attribute": "b", "category": "boolean"}]}}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(Config::from_json_str(r#"{"parser": {}}"#).is_err());
    }
}

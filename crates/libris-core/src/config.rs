//! Configuration for libris-core
//!
//! The catalog needs very little: where to fetch from, how many results to
//! ask for, and how many books a page and the carousel show.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::LATEST_COUNT;
use crate::sources::DateStyle;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrisConfig {
    /// Remote catalog settings
    pub source: SourceConfig,
    /// Catalog view settings
    pub catalog: CatalogConfig,
}

/// Remote catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the Open Library API, without trailing path
    pub base_url: String,
    /// `limit` query parameter sent with every subject request
    pub result_limit: u32,
    pub user_agent: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Which upstream field becomes the record date
    pub date_style: DateStyle,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            result_limit: 200,
            user_agent: format!("libris/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            date_style: DateStyle::default(),
        }
    }
}

/// Catalog view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Books per grid page
    pub page_size: usize,
    /// Books in the "latest" carousel
    pub latest_count: usize,
    /// Subject fetched on initial load
    pub default_subject: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            latest_count: LATEST_COUNT,
            default_subject: "love".to_string(),
        }
    }
}

impl LibrisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::OutOfRange(
                "page_size must be positive".to_string(),
            ));
        }

        if self.catalog.latest_count == 0 {
            return Err(ConfigError::OutOfRange(
                "latest_count must be positive".to_string(),
            ));
        }

        if self.source.result_limit == 0 {
            return Err(ConfigError::OutOfRange(
                "result_limit must be positive".to_string(),
            ));
        }

        if self.source.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "timeout_secs must be positive".to_string(),
            ));
        }

        if self.catalog.default_subject.trim().is_empty() {
            return Err(ConfigError::MissingField("default_subject".to_string()));
        }

        url::Url::parse(&self.source.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.source.base_url, e)))?;

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LibrisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.latest_count, 3);
        assert_eq!(config.source.result_limit, 200);
    }

    #[test]
    fn test_json_serialization() {
        let config = LibrisConfig::default();
        let json = config.to_json().unwrap();
        let parsed = LibrisConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LibrisConfig::from_toml(
            r#"
            [source]
            date_style = "created"

            [catalog]
            page_size = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.source.date_style, DateStyle::Created);
        assert_eq!(config.source.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(config.catalog.default_subject, "love");
    }

    #[test]
    fn test_toml_serialization() {
        let config = LibrisConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert_eq!(LibrisConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_zero_page_size() {
        let mut config = LibrisConfig::default();
        config.catalog.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));
    }

    #[test]
    fn test_blank_subject() {
        let mut config = LibrisConfig::default();
        config.catalog.default_subject = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_bad_base_url() {
        let mut config = LibrisConfig::default();
        config.source.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(matches!(
            LibrisConfig::from_toml("[catalog]\npage_size = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }
}

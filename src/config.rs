//! Optional TOML configuration.
//!
//! ```toml
//! [[anchors]]
//! title = "HEARING"
//! max_dates = 1
//!
//! [[anchors]]
//! title = "TRIAL"
//! max_dates = 1
//! date_rule = "first_of_month"
//!
//! [recognizer]
//! reference_date = "2024-01-15"
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Anchor, AnchorCatalog};
use crate::dates::PatternRecognizer;
use crate::error::ExtractError;
use crate::parser::DeadlineParser;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Date that "today" refers to; the local date when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Replaces the built-in catalog when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<Anchor>,
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let contents = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ExtractError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.catalog()?;
        Ok(config)
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<AnchorCatalog, ExtractError> {
        if self.anchors.is_empty() {
            Ok(AnchorCatalog::default())
        } else {
            AnchorCatalog::new(self.anchors.clone())
        }
    }

    pub fn recognizer(&self) -> PatternRecognizer {
        match self.recognizer.reference_date {
            Some(d) => PatternRecognizer::with_reference(d),
            None => PatternRecognizer::new(),
        }
    }

    pub fn build_parser(&self) -> Result<DeadlineParser, ExtractError> {
        Ok(DeadlineParser::new(self.catalog()?, Box::new(self.recognizer())))
    }
}

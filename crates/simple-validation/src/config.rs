// File: src/config.rs
// Purpose: Configuration parsing from simple-validation.toml

use crate::argument::RuleSet;
use crate::host::Form;
use crate::registry::{Extension, Registry};
use crate::rules::Format;
use crate::settings::{Settings, SettingsPatch};
use crate::validator::Validator;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "simple-validation.toml";

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    /// Extra `format` aliases, name to regex
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Whether the `moment` rule gets a date parser (default: true)
    #[serde(default = "default_true")]
    pub date_parser: bool,

    /// Declared form fields, in order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// A declared field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(default)]
    pub rules: RuleSet,

    /// Initial value
    #[serde(default)]
    pub value: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            aliases: BTreeMap::new(),
            date_parser: true,
            fields: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./simple-validation.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Parse TOML text; empty text yields the default config
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Built-in rules with this config's settings and aliases applied
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = Registry::with_defaults();

        let mut extension = Extension::new().settings(SettingsPatch {
            valid_class: Some(self.settings.valid_class.clone()),
            invalid_class: Some(self.settings.invalid_class.clone()),
        });

        if !self.aliases.is_empty() {
            let mut format = Format::new();
            for (name, pattern) in &self.aliases {
                format = format
                    .with_alias(name.as_str(), pattern)
                    .with_context(|| format!("Invalid format alias `{}`", name))?;
            }
            extension = extension.rule("format", format);
        }

        registry.extend(extension);
        Ok(registry)
    }

    /// Validator over [`registry`](Self::registry), with a date parser when
    /// enabled and available
    pub fn validator(&self) -> Result<Validator> {
        let validator = Validator::new(Arc::new(self.registry()?));
        Ok(if self.date_parser {
            with_default_date_parser(validator)
        } else {
            validator
        })
    }

    /// Form with every declared field and its initial value
    pub fn form(&self) -> Result<Form> {
        let mut form = Form::new(self.validator()?);
        for field in &self.fields {
            form.add_field(field.name.clone(), field.rules.clone());
            if let Some(value) = &field.value {
                form.set_value(field.name.clone(), value.clone());
            }
        }
        Ok(form)
    }
}

#[cfg(feature = "chrono")]
fn with_default_date_parser(validator: Validator) -> Validator {
    validator.with_date_parser(crate::date::ChronoDateParser::new())
}

#[cfg(not(feature = "chrono"))]
fn with_default_date_parser(validator: Validator) -> Validator {
    tracing::warn!("built without the `chrono` feature; `moment` rules will be skipped");
    validator
}

// File: src/settings.rs
// Purpose: Presentation settings carried alongside the rule registry

use serde::{Deserialize, Serialize};

/// Class names a presenter applies to a field's container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Applied when validation passes
    #[serde(default = "default_valid_class")]
    pub valid_class: String,

    /// Applied when validation fails
    #[serde(default = "default_invalid_class")]
    pub invalid_class: String,
}

fn default_valid_class() -> String {
    "sv-valid".to_string()
}

fn default_invalid_class() -> String {
    "sv-invalid".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            valid_class: default_valid_class(),
            invalid_class: default_invalid_class(),
        }
    }
}

/// Partial settings; only the keys that are present override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub valid_class: Option<String>,

    #[serde(default)]
    pub invalid_class: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.valid_class.is_none() && self.invalid_class.is_none()
    }
}

impl Settings {
    /// Merge a patch into these settings
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(class) = patch.valid_class {
            self.valid_class = class;
        }
        if let Some(class) = patch.invalid_class {
            self.invalid_class = class;
        }
    }
}

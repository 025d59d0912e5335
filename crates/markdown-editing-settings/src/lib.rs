#![warn(missing_docs)]
//! `markdown-editing-settings` - per-view settings for the `markdown-editing` commands.
//!
//! Settings use the host's JSON keys (`mde.list_indent_bullets`, `tab_size`, ...). Every field has
//! a default, so partial settings files are accepted and unknown keys are ignored.
//!
//! ```rust
//! use markdown_editing_settings::Settings;
//!
//! let settings = Settings::from_json_str(r#"{ "translate_tabs_to_spaces": true, "tab_size": 2 }"#)
//!     .unwrap();
//! assert_eq!(settings.indent_unit(), "  ");
//! assert_eq!(settings.list_indent_bullets, ["*", "-", "+"]);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating settings.
pub enum SettingsError {
    #[error("JSON parse error: {0}")]
    /// The settings document is not valid JSON or has mistyped values.
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    /// Reading the settings file failed.
    Io(#[from] std::io::Error),

    #[error("invalid value for '{key}': {message}")]
    /// A value parsed but is out of range.
    Invalid {
        /// Settings key of the offending value.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Settings consulted by list editing and folding commands.
pub struct Settings {
    #[serde(rename = "mde.list_indent_bullets")]
    /// Bullet glyphs cycled through when indenting; the first one is used for new bullets.
    pub list_indent_bullets: Vec<String>,

    #[serde(rename = "mde.list_indent_auto_switch_bullet")]
    /// Switch the bullet glyph when a list item is (un)indented.
    pub list_indent_auto_switch_bullet: bool,

    /// Indent with spaces instead of a tab.
    pub translate_tabs_to_spaces: bool,

    /// Width of one indent level when indenting with spaces.
    pub tab_size: usize,

    #[serde(rename = "mde.auto_increment_ordered_list_number")]
    /// Number ordered list items incrementally instead of repeating the same number.
    pub auto_increment_ordered_list_number: bool,

    #[serde(rename = "mde.list_align_text")]
    /// Keep item text aligned when converting between ordered and unordered markers.
    pub list_align_text: bool,

    #[serde(rename = "mde.auto_fold_link.enabled")]
    /// Fold link destinations together with sections.
    pub auto_fold_link: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_indent_bullets: vec!["*".to_string(), "-".to_string(), "+".to_string()],
            list_indent_auto_switch_bullet: true,
            translate_tabs_to_spaces: false,
            tab_size: 4,
            auto_increment_ordered_list_number: true,
            list_align_text: true,
            auto_fold_link: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from an already decoded JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check value ranges that the JSON types alone cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.list_indent_bullets.is_empty() {
            return Err(SettingsError::Invalid {
                key: "mde.list_indent_bullets",
                message: "at least one bullet is required".to_string(),
            });
        }

        if let Some(bad) = self
            .list_indent_bullets
            .iter()
            .find(|b| b.chars().count() != 1 || b.chars().any(char::is_whitespace))
        {
            return Err(SettingsError::Invalid {
                key: "mde.list_indent_bullets",
                message: format!("bullet {bad:?} must be a single non-whitespace character"),
            });
        }

        if self.tab_size == 0 {
            return Err(SettingsError::Invalid {
                key: "tab_size",
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Text inserted for one indent level.
    pub fn indent_unit(&self) -> String {
        if self.translate_tabs_to_spaces {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }
}

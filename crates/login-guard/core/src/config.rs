// File: src/config.rs
// Purpose: Guard configuration (selectors, element ids, rule thresholds)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::GateError;

/// Guard configuration
///
/// Every field has a default matching the stock login template, so an empty
/// TOML document or an empty JS object yields a working config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Selector for the inputs that are validated on submit
    #[serde(default = "default_field_selector")]
    pub field_selector: String,

    /// Selector for the inputs whose error marker is cleared on focus
    #[serde(default = "default_focus_selector")]
    pub focus_selector: String,

    /// Selector for the submit button
    #[serde(default = "default_submit_selector")]
    pub submit_selector: String,

    /// Class toggled on a field's parent element while it is errored
    #[serde(default = "default_error_class")]
    pub error_class: String,

    /// Element id of the password input
    #[serde(default = "default_password_id")]
    pub password_id: String,

    /// Element id of the password confirmation input
    #[serde(default = "default_confirmation_id")]
    pub confirmation_id: String,

    #[serde(default)]
    pub rules: RuleSettings,

    /// Absorb repeated successful submits until the gate is released
    #[serde(default = "default_false")]
    pub guard_reentry: bool,
}

/// Thresholds and switches for the per-field rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(default = "default_min_password_chars")]
    pub min_password_chars: usize,

    #[serde(default = "default_min_first_name_chars")]
    pub min_first_name_chars: usize,

    /// Apply the username character rules instead of the required-value rule
    #[serde(default = "default_false")]
    pub strict_username: bool,
}

// Default values
fn default_field_selector() -> String {
    ".validate-input .input100".to_string()
}

fn default_focus_selector() -> String {
    ".validate-form .input100".to_string()
}

fn default_submit_selector() -> String {
    ".login100-form-btn".to_string()
}

fn default_error_class() -> String {
    "alert-validate".to_string()
}

fn default_password_id() -> String {
    "pass1".to_string()
}

fn default_confirmation_id() -> String {
    "pass2".to_string()
}

fn default_min_password_chars() -> usize {
    8
}

fn default_min_first_name_chars() -> usize {
    2
}

fn default_false() -> bool {
    false
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            field_selector: default_field_selector(),
            focus_selector: default_focus_selector(),
            submit_selector: default_submit_selector(),
            error_class: default_error_class(),
            password_id: default_password_id(),
            confirmation_id: default_confirmation_id(),
            rules: RuleSettings::default(),
            guard_reentry: false,
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            min_password_chars: default_min_password_chars(),
            min_first_name_chars: default_min_first_name_chars(),
            strict_username: false,
        }
    }
}

impl GuardConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: GuardConfig =
            toml::from_str(content).context("Failed to parse guard config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if it is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Reject values that would make the guard inert or unsatisfiable
    pub fn validate(&self) -> std::result::Result<(), GateError> {
        let required = [
            ("field_selector", &self.field_selector),
            ("focus_selector", &self.focus_selector),
            ("submit_selector", &self.submit_selector),
            ("error_class", &self.error_class),
            ("password_id", &self.password_id),
            ("confirmation_id", &self.confirmation_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(GateError::InvalidConfig(format!("{} must not be empty", key)));
            }
        }

        if self.error_class.contains(char::is_whitespace) {
            return Err(GateError::InvalidConfig(
                "error_class must be a single class name".to_string(),
            ));
        }

        if self.password_id == self.confirmation_id {
            return Err(GateError::InvalidConfig(
                "password_id and confirmation_id must differ".to_string(),
            ));
        }

        if self.rules.min_password_chars == 0 || self.rules.min_first_name_chars == 0 {
            return Err(GateError::InvalidConfig(
                "minimum lengths must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

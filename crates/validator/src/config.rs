//! Validator configuration
//!
//! [`ValidatorConfig`] carries the defaults a
//! [`RecordValidatorBuilder`](crate::RecordValidatorBuilder) hands to the
//! field validators it finalizes. Explicit per-field settings always win.

use crate::error::ConfigError;
use crate::naming::{AccessorNameStrategy, SharedNamingStrategy};
use crate::report::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Defaults applied when finalizing field validators.
///
/// # Examples
///
/// ```rust
/// use bean_validator::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json(r#"{ "separator": "/" }"#).unwrap();
/// assert_eq!(config.separator, "/");
/// assert!(!config.derive_field_names);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Separator for field validators that did not set one.
    pub separator: String,
    /// Derive paths of unnamed fields with [`AccessorNameStrategy`].
    pub derive_field_names: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            derive_field_names: false,
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the default separator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enables or disables accessor-derived field paths.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_derived_field_names(mut self, enabled: bool) -> Self {
        self.derive_field_names = enabled;
        self
    }

    /// Naming strategy for unnamed fields, if this configuration enables one.
    pub(crate) fn naming_strategy(&self) -> Option<SharedNamingStrategy> {
        self.derive_field_names
            .then(|| Arc::new(AccessorNameStrategy) as SharedNamingStrategy)
    }
}

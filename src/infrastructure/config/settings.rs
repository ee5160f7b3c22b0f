//! # Store Settings
//!
//! Per-store switches for the estimate pipeline.
//!
//! Settings come from a TOML file layered with `ESTIMATED_SHIPPING__*`
//! environment variables (a `.env` file is honoured). A `default` section
//! applies to every store; `stores.<code>` sections override single values.
//!
//! ```toml
//! [default]
//! enable = true
//! use_lowest = true
//! default_country = "US"
//!
//! [stores.de]
//! default_country = "DE"
//! ```
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::infrastructure::config::{EstimateSettings, StoreSettingsProvider};
//! use estimated_shipping::domain::value_objects::StoreId;
//!
//! let settings = EstimateSettings::from_toml_str(r#"
//!     [default]
//!     enable = true
//!     [stores.de]
//!     default_country = "DE"
//! "#).unwrap();
//!
//! let de = settings.settings(&StoreId::new("de"));
//! assert!(de.enable);
//! assert_eq!(de.default_country.as_str(), "DE");
//! ```

use crate::domain::value_objects::{CountryId, StoreId};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "ESTIMATED_SHIPPING";

/// Country used when no store setting names one.
pub const FALLBACK_COUNTRY: &str = "US";

/// Error type for loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("settings error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Effective settings for one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Whether the estimate pipeline runs at all.
    pub enable: bool,
    /// Rank cheapest first; most expensive first when false.
    pub use_lowest: bool,
    /// Keep an already-selected method when it is still offered.
    pub keep_existing: bool,
    /// Country applied to addresses without one.
    pub default_country: CountryId,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            enable: false,
            use_lowest: false,
            keep_existing: false,
            default_country: fallback_country(),
        }
    }
}

fn fallback_country() -> CountryId {
    CountryId::from_static(FALLBACK_COUNTRY)
}

/// Optional per-store overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOverrides {
    /// Overrides `enable`.
    pub enable: Option<bool>,
    /// Overrides `use_lowest`.
    pub use_lowest: Option<bool>,
    /// Overrides `keep_existing`.
    pub keep_existing: Option<bool>,
    /// Overrides `default_country`.
    pub default_country: Option<CountryId>,
}

impl StoreOverrides {
    fn apply(&self, base: &StoreSettings) -> StoreSettings {
        StoreSettings {
            enable: self.enable.unwrap_or(base.enable),
            use_lowest: self.use_lowest.unwrap_or(base.use_lowest),
            keep_existing: self.keep_existing.unwrap_or(base.keep_existing),
            default_country: self
                .default_country
                .clone()
                .unwrap_or_else(|| base.default_country.clone()),
        }
    }
}

/// Source of per-store settings.
pub trait StoreSettingsProvider: Send + Sync + fmt::Debug {
    /// Returns the effective settings for `store`.
    fn settings(&self, store: &StoreId) -> StoreSettings;
}

/// Settings for all stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateSettings {
    /// Settings shared by every store.
    pub default: StoreSettings,
    /// Per-store overrides keyed by store code.
    pub stores: HashMap<String, StoreOverrides>,
}

impl EstimateSettings {
    /// Creates settings where every store uses `default`.
    #[must_use]
    pub fn uniform(default: StoreSettings) -> Self {
        Self {
            default,
            stores: HashMap::new(),
        }
    }

    /// Adds overrides for one store.
    #[must_use]
    pub fn with_store(mut self, store: &StoreId, overrides: StoreOverrides) -> Self {
        self.stores.insert(store.as_str().to_string(), overrides);
        self
    }

    /// Loads settings from an optional TOML file and the environment.
    ///
    /// Variables look like `ESTIMATED_SHIPPING__DEFAULT__ENABLE=true` or
    /// `ESTIMATED_SHIPPING__STORES__DE__USE_LOWEST=false`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Load` if the file is missing or a value has
    /// the wrong type.
    pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "loaded .env file");
        }

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Load` if the text is not valid settings TOML.
    pub fn from_toml_str(toml: &str) -> SettingsResult<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

impl StoreSettingsProvider for EstimateSettings {
    fn settings(&self, store: &StoreId) -> StoreSettings {
        match self.stores.get(store.as_str()) {
            Some(overrides) => overrides.apply(&self.default),
            None => self.default.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_disabled() {
        let settings = StoreSettings::default();
        assert!(!settings.enable);
        assert!(!settings.use_lowest);
        assert!(!settings.keep_existing);
        assert_eq!(settings.default_country.as_str(), "US");
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let settings = EstimateSettings::from_toml_str("").unwrap();
        assert_eq!(settings.settings(&StoreId::default()), StoreSettings::default());
    }

    #[test]
    fn store_overrides_single_values() {
        let settings = EstimateSettings::from_toml_str(
            r#"
            [default]
            enable = true
            use_lowest = true

            [stores.fr]
            use_lowest = false
            default_country = "fr"
            "#,
        )
        .unwrap();

        let fr = settings.settings(&StoreId::new("fr"));
        assert!(fr.enable);
        assert!(!fr.use_lowest);
        assert_eq!(fr.default_country.as_str(), "FR");

        let other = settings.settings(&StoreId::new("en"));
        assert!(other.use_lowest);
        assert_eq!(other.default_country.as_str(), "US");
    }

    #[test]
    fn invalid_country_rejected() {
        let result = EstimateSettings::from_toml_str(
            r#"
            [default]
            default_country = "Germany"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn programmatic_overrides() {
        let store = StoreId::new("b2b");
        let settings = EstimateSettings::uniform(StoreSettings {
            enable: true,
            ..StoreSettings::default()
        })
        .with_store(
            &store,
            StoreOverrides {
                keep_existing: Some(true),
                ..StoreOverrides::default()
            },
        );
        let b2b = settings.settings(&store);
        assert!(b2b.enable);
        assert!(b2b.keep_existing);
    }

    #[test]
    fn load_missing_file_fails() {
        let result = EstimateSettings::load(Some(Path::new("/nonexistent/estimate.toml")));
        assert!(result.is_err());
    }
}

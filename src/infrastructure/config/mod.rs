//! # Configuration
//!
//! Per-store settings for the estimate pipeline.

pub mod settings;

pub use settings::{
    ENV_PREFIX, EstimateSettings, FALLBACK_COUNTRY, SettingsError, SettingsResult, StoreOverrides,
    StoreSettings, StoreSettingsProvider,
};

//! # Infrastructure Layer
//!
//! Adapters around the domain: carrier quoting, customer persistence,
//! per-store configuration and log output.
//!
//! - [`carriers`]: quote provider and method management ports
//! - [`persistence`]: customer repository
//! - [`config`]: store settings
//! - [`telemetry`]: `tracing` subscriber setup

pub mod carriers;
pub mod config;
pub mod persistence;
pub mod telemetry;

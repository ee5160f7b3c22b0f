//! # Carriers
//!
//! Ports for rating carts and persisting the chosen method, with in-memory
//! adapters.
//!
//! - [`QuoteProvider`]: estimates candidate methods for an address
//! - [`MethodManagement`]: writes the chosen method onto a saved cart

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::{
    MethodManagementError, MethodManagementResult, QuoteProviderError, QuoteProviderResult,
};
pub use in_memory::{EstimateCall, RecordingMethodManagement, SetMethodCall, StaticQuoteProvider};
pub use traits::{MethodManagement, QuoteProvider};

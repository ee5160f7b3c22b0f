//! # Carrier Errors
//!
//! Error types for the quote provider and method management ports.
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::infrastructure::carriers::error::{MethodManagementError, QuoteProviderError};
//!
//! let error = QuoteProviderError::timeout("carrier API did not answer");
//! assert_eq!(error.to_string(), "quote provider timeout: carrier API did not answer");
//!
//! let error = MethodManagementError::invalid_state("cart is inactive");
//! assert_eq!(error.code(), "invalid_state");
//! ```

use thiserror::Error;

/// Error type for quote provider operations.
#[derive(Debug, Clone, Error)]
pub enum QuoteProviderError {
    /// Carrier request timed out.
    #[error("quote provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("quote provider connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The cart or address cannot be rated.
    #[error("quote provider invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Referenced cart or customer address does not exist.
    #[error("quote provider not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Unclassified provider failure.
    #[error("quote provider internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl QuoteProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type for quote provider operations.
pub type QuoteProviderResult<T> = Result<T, QuoteProviderError>;

/// Error type for persisting the selected method on a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodManagementError {
    /// Cart or method does not exist.
    #[error("shipping method not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Carrier or method code rejected.
    #[error("invalid shipping method input: {message}")]
    InvalidInput {
        /// Error message.
        message: String,
    },

    /// The cart could not be saved.
    #[error("could not save shipping method: {message}")]
    SaveConflict {
        /// Error message.
        message: String,
    },

    /// The cart cannot take a shipping method in its current state.
    #[error("invalid cart state: {message}")]
    InvalidState {
        /// Error message.
        message: String,
    },
}

impl MethodManagementError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a save conflict error.
    #[must_use]
    pub fn save_conflict(message: impl Into<String>) -> Self {
        Self::SaveConflict {
            message: message.into(),
        }
    }

    /// Creates an invalid state error.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidInput { .. } => "invalid_input",
            Self::SaveConflict { .. } => "save_conflict",
            Self::InvalidState { .. } => "invalid_state",
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::InvalidInput { message }
            | Self::SaveConflict { message }
            | Self::InvalidState { message } => message,
        }
    }
}

/// Result type for method management operations.
pub type MethodManagementResult<T> = Result<T, MethodManagementError>;

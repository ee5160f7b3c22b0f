//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Persistence failures of the selected method are not errors: they are
//! recorded on the cart. Everything that stops the pipeline ends up here.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - Invalid values from collaborators
//! ├── QuoteProvider(QuoteProviderError)   - Rate quoting failures
//! ├── Repository(RepositoryError)         - Customer lookup failures
//! └── Settings(SettingsError)             - Settings could not be loaded
//! ```
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::application::error::ApplicationError;
//! use estimated_shipping::infrastructure::carriers::QuoteProviderError;
//!
//! let err: ApplicationError = QuoteProviderError::timeout("carrier gateway").into();
//! assert!(matches!(err, ApplicationError::QuoteProvider(_)));
//! assert!(err.to_string().starts_with("quote provider error"));
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::carriers::QuoteProviderError;
use crate::infrastructure::config::SettingsError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from value validation or arithmetic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The quote provider failed.
    #[error("quote provider error: {0}")]
    QuoteProvider(#[from] QuoteProviderError),

    /// The customer repository failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Settings could not be loaded.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_domain_error() {
        let err: ApplicationError = DomainError::invalid_country("XYZ").into();
        assert!(err.to_string().contains("domain error"));
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn from_quote_provider_error() {
        let err: ApplicationError = QuoteProviderError::connection("refused").into();
        assert!(matches!(
            err,
            ApplicationError::QuoteProvider(QuoteProviderError::Connection { .. })
        ));
        assert_eq!(
            err.to_string(),
            "quote provider error: quote provider connection error: refused"
        );
    }

    #[test]
    fn from_repository_error() {
        let err: ApplicationError = RepositoryError::connection("pool closed").into();
        assert!(matches!(
            err,
            ApplicationError::Repository(RepositoryError::Connection(_))
        ));
        assert!(err.to_string().contains("pool closed"));
    }
}

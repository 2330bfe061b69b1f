//! Error types for market data operations.

use thiserror::Error;

/// Errors that can occur while fetching market data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rejected our credentials or session.
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        /// The provider that rejected the request
        provider: String,
        /// The provider's failure message
        message: String,
    },

    /// The symbol exists but has no quotes in the requested period.
    #[error("No data for date range")]
    NoDataForRange,

    /// The request to the provider exceeded the configured time bound.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider returned an error response.
    #[error("Provider unavailable: {provider} - {message}")]
    Unavailable {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether this error means the external data source was unreachable
    /// or unusable, as opposed to the request itself being invalid.
    ///
    /// Callers use this to distinguish "try again later" conditions from
    /// terminal ones like [`MarketDataError::SymbolNotFound`].
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Unavailable { .. } | Self::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_external() {
        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert!(error.is_external());
    }

    #[test]
    fn test_unavailable_is_external() {
        let error = MarketDataError::Unavailable {
            provider: "YAHOO".to_string(),
            message: "HTTP 503".to_string(),
        };
        assert!(error.is_external());
    }

    #[test]
    fn test_symbol_not_found_is_not_external() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert!(!error.is_external());
    }

    #[test]
    fn test_authentication_is_not_external() {
        let error = MarketDataError::Authentication {
            provider: "YAHOO".to_string(),
            message: "session expired".to_string(),
        };
        assert!(!error.is_external());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: YAHOO");

        let error = MarketDataError::Authentication {
            provider: "YAHOO".to_string(),
            message: "token expired".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Authentication failed for YAHOO: token expired"
        );
    }
}

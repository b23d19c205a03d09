//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers everything that can go wrong while fetching a
//! listing from an external source or resolving a security name against it.

use thiserror::Error;

/// Errors that can occur during listing fetches and symbol resolution.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested security name is not present in the populated listing.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The request to the listing source timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The listing source answered with something other than a success.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The listing page could not be interpreted.
    #[error("Failed to parse listing: {0}")]
    ParseError(String),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns `true` for failures caused by the transport rather than by the data.
    ///
    /// # Examples
    ///
    /// ```
    /// use folioport_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::Timeout { provider: "TWSE".to_string() };
    /// assert!(error.is_transport());
    ///
    /// let error = MarketDataError::SymbolNotFound("台積電".to_string());
    /// assert!(!error.is_transport());
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Network(_) | Self::ProviderError { .. }
        )
    }
}

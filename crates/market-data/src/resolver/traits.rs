//! Resolution traits for the market data crate.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Resolves a security display name to an exchange-qualified symbol.
#[async_trait]
pub trait SymbolResolver: Send + Sync {
    /// Resolve a display name (e.g. "台積電") to a Yahoo symbol (e.g. "2330.TW").
    ///
    /// # Returns
    /// * `Ok(symbol)` - The exchange-qualified symbol
    /// * `Err(MarketDataError::SymbolNotFound)` - The name is not listed
    /// * `Err(_)` - The listing could not be fetched
    async fn resolve(&self, name: &str) -> Result<String, MarketDataError>;
}

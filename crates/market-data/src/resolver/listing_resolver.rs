//! Name -> symbol resolver backed by a lazily fetched exchange listing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::MarketDataError;
use crate::models::ListingTier;
use crate::provider::ListingProvider;

use super::traits::SymbolResolver;

/// Resolves display names against a listing that is fetched at most once.
///
/// The map is populated on the first lookup. Concurrent first lookups wait
/// on the same population instead of fetching twice. A failed population,
/// or one that yields no securities, leaves the resolver empty so that a
/// later lookup can try again.
pub struct ListingSymbolResolver {
    provider: Arc<dyn ListingProvider>,
    symbols: OnceCell<HashMap<String, String>>,
}

impl ListingSymbolResolver {
    pub fn new(provider: Arc<dyn ListingProvider>) -> Self {
        Self {
            provider,
            symbols: OnceCell::new(),
        }
    }

    /// Populate the map if it is still empty and return it.
    ///
    /// Calling this again after a successful population is a no-op.
    pub async fn ensure_populated(&self) -> Result<&HashMap<String, String>, MarketDataError> {
        self.symbols.get_or_try_init(|| self.populate()).await
    }

    /// Whether the listing has already been fetched.
    pub fn is_populated(&self) -> bool {
        self.symbols.initialized()
    }

    /// Number of cached names, zero before population.
    pub fn len(&self) -> usize {
        self.symbols.get().map(HashMap::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn populate(&self) -> Result<HashMap<String, String>, MarketDataError> {
        let mut symbols = HashMap::new();

        for tier in ListingTier::ALL {
            let securities = self.provider.fetch_listing(tier).await?;
            debug!(
                "[{}] {} securities on the {} page",
                self.provider.id(),
                securities.len(),
                tier.marker()
            );
            for security in securities {
                let symbol = security.symbol();
                symbols.insert(security.name, symbol);
            }
        }

        if symbols.is_empty() {
            warn!("[{}] Listing yielded no securities", self.provider.id());
            return Err(MarketDataError::ParseError(
                "listing yielded no securities".to_string(),
            ));
        }

        info!(
            "[{}] Symbol map populated with {} names",
            self.provider.id(),
            symbols.len()
        );
        Ok(symbols)
    }
}

#[async_trait]
impl SymbolResolver for ListingSymbolResolver {
    async fn resolve(&self, name: &str) -> Result<String, MarketDataError> {
        let symbols = self.ensure_populated().await?;
        symbols
            .get(name.trim())
            .cloned()
            .ok_or_else(|| MarketDataError::SymbolNotFound(name.to_string()))
    }
}

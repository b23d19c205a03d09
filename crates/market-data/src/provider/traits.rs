//! Listing provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{ListedSecurity, ListingTier};

/// Trait for sources of exchange listings.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use folioport_market_data::provider::ListingProvider;
///
/// struct StaticListing(Vec<ListedSecurity>);
///
/// #[async_trait]
/// impl ListingProvider for StaticListing {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch_listing(&self, tier: ListingTier) -> Result<Vec<ListedSecurity>, MarketDataError> {
///         Ok(self.0.iter().filter(|s| s.tier == tier).cloned().collect())
///     }
/// }
/// ```
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch every security published for one listing tier.
    ///
    /// Rows the provider cannot classify are dropped here; only securities
    /// with a numeric code and a recognized tier are returned.
    async fn fetch_listing(
        &self,
        tier: ListingTier,
    ) -> Result<Vec<ListedSecurity>, MarketDataError>;
}

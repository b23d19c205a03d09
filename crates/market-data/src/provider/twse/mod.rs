//! TWSE ISIN listing provider.
//!
//! The Taiwan Stock Exchange publishes its security master as plain HTML
//! pages at `isin.twse.com.tw`, one page per market (`strMode`). The pages
//! are Big5 encoded and carry a single `<table class="h4">` whose first cell
//! is `"<code>\u{3000}<name>"` and whose fourth cell names the market.

mod parser;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{ListedSecurity, ListingTier};
use crate::provider::ListingProvider;

pub use parser::{decode_listing, parse_listing_html};

const PROVIDER_ID: &str = "TWSE";

/// Default base URL of the ISIN listing service.
pub const DEFAULT_TWSE_ISIN_URL: &str = "https://isin.twse.com.tw";

/// Default timeout for listing requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Listing provider backed by the TWSE ISIN pages.
#[derive(Debug, Clone)]
pub struct TwseListingProvider {
    client: reqwest::Client,
    base_url: String,
}

impl TwseListingProvider {
    /// Create a provider against the public ISIN service with the default timeout.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(
            DEFAULT_TWSE_ISIN_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a provider against an arbitrary base URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the listing page for a tier.
    pub fn listing_url(&self, tier: ListingTier) -> String {
        format!(
            "{}/isin/C_public.jsp?strMode={}",
            self.base_url,
            tier.str_mode()
        )
    }

    fn map_request_error(err: reqwest::Error) -> MarketDataError {
        if err.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::Network(err)
        }
    }
}

#[async_trait]
impl ListingProvider for TwseListingProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_listing(
        &self,
        tier: ListingTier,
    ) -> Result<Vec<ListedSecurity>, MarketDataError> {
        let url = self.listing_url(tier);
        debug!("[TWSE] GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Listing request for {} failed: {}", tier.marker(), status),
            });
        }

        let body = response.bytes().await.map_err(Self::map_request_error)?;
        let html = decode_listing(&body);
        let securities = parse_listing_html(&html)?;

        if securities.is_empty() {
            warn!("[TWSE] Listing page for {} yielded no securities", tier.marker());
        } else {
            debug!(
                "[TWSE] Parsed {} securities from the {} listing",
                securities.len(),
                tier.marker()
            );
        }

        Ok(securities)
    }
}

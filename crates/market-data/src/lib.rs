//! Folioport Market Data Crate
//!
//! This crate turns exchange listings into symbol lookups for the importer.
//!
//! # Overview
//!
//! Broker exports identify securities in different ways. Some carry a ticker
//! that only needs a qualifier stripped; others only carry the security's
//! display name. For the latter the crate provides:
//! - Listing providers that fetch the securities published by an exchange
//!   (currently the TWSE ISIN pages)
//! - A resolver that builds a name -> symbol map from those listings once
//!   per resolver instance and answers lookups from it
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! | Broker adapter   | --> |  SymbolResolver  |  (name -> "2330.TW")
//! +------------------+     +------------------+
//!                                  |
//!                                  v   first lookup only
//!                          +------------------+
//!                          | ListingProvider  |  (TWSE, per tier)
//!                          +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::MarketDataError;
pub use models::{ListedSecurity, ListingTier};
pub use provider::twse::{TwseListingProvider, DEFAULT_TWSE_ISIN_URL};
pub use provider::ListingProvider;
pub use resolver::{ListingSymbolResolver, SymbolResolver};

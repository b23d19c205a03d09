//! Symbol resolution for broker exports.
//!
//! Broker exports from Taiwanese brokerages name securities by their
//! Chinese display name only. The resolver turns those names into Yahoo
//! symbols by looking them up in the exchange listing:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            ListingSymbolResolver              │
//! │                                               │
//! │  first lookup ──► ListingProvider (per tier)  │
//! │                   上市 → code + ".TW"          │
//! │                   上櫃 → code + ".TWO"         │
//! │                        │                      │
//! │                        ▼                      │
//! │            name → symbol map (once)           │
//! │                        │                      │
//! │  every lookup ◄────────┘                      │
//! └───────────────────────────────────────────────┘
//! ```

mod listing_resolver;
mod traits;

pub use listing_resolver::ListingSymbolResolver;
pub use traits::SymbolResolver;

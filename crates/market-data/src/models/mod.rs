//! Market data models
//!
//! - `listing` - Listing tiers and the securities parsed from an exchange listing

mod listing;

pub use listing::{ListedSecurity, ListingTier};

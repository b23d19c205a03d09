//! Listing provider abstractions and implementations.
//!
//! A provider publishes the securities traded on a market, tier by tier.
//! The resolver module consumes those listings to build name -> symbol maps;
//! providers themselves never cache.

mod traits;

pub mod twse;

pub use traits::ListingProvider;

//! Review module - the one-record-at-a-time confirmation workflow.
//!
//! A session walks the normalized queue front to back. Each decision
//! either submits the current record, skips it, or cancels the rest.

mod review_errors;
mod review_model;
mod review_session;
mod review_traits;
mod session_registry;

#[cfg(test)]
mod review_session_tests;

pub use review_errors::ReviewError;
pub use review_model::{ReviewDecision, ReviewState, ReviewSummary, TerminationReason};
pub use review_session::ImportSession;
pub use review_traits::ActivitySubmitter;
pub use session_registry::SessionRegistry;

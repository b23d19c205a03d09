//! Folioport Core - Broker export normalization and import review.
//!
//! This crate turns broker transaction exports into the activity records
//! accepted by a Ghostfolio instance and drives the one-record-at-a-time
//! review that precedes every submission. It knows nothing about how the
//! records are transported; submission goes through the
//! [`review::ActivitySubmitter`] trait implemented by the `connect` crate.

pub mod activities;
pub mod brokers;
pub mod constants;
pub mod errors;
pub mod normalization;
pub mod review;

pub use activities::{ActivityRecord, ActivityType, DataSource, ImportEnvelope, ImportTable};
pub use brokers::{AccountRouting, BrokerAdapter, BrokerFormat};
pub use normalization::ImportNormalizer;
pub use review::{
    ActivitySubmitter, ImportSession, ReviewDecision, ReviewState, ReviewSummary, SessionRegistry,
    TerminationReason,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;

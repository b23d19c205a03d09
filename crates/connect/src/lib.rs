//! Folioport Connect - Ghostfolio API client.
//!
//! This crate authenticates against a Ghostfolio instance and submits the
//! envelopes confirmed during review, implementing the core crate's
//! [`ActivitySubmitter`](folioport_core::ActivitySubmitter) seam.

pub mod client;

pub use client::{GhostfolioClient, DEFAULT_GHOSTFOLIO_URL, DEFAULT_TIMEOUT_SECS};

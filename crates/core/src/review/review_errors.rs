//! Review workflow error types.

use thiserror::Error;

/// Errors raised by the review workflow itself.
///
/// Submission failures are reported with the submitter's own error
/// (`RemoteRejected`, `TransportFailure`); these cover misuse of a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("The import session has already ended")]
    SessionTerminated,

    #[error("No import session for {0}")]
    NoSession(String),

    #[error("Unrecognized decision: {0}")]
    InvalidDecision(String),
}

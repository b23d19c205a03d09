//! Submission seam of the review workflow.

use async_trait::async_trait;

use crate::activities::ImportEnvelope;
use crate::errors::Result;

/// Sends one confirmed envelope to the portfolio service.
///
/// Implementations return `Error::RemoteRejected` for a non-success
/// response and `Error::TransportFailure` when the service cannot be
/// reached. Neither is retried by the review session.
#[async_trait]
pub trait ActivitySubmitter: Send + Sync {
    async fn submit(&self, envelope: &ImportEnvelope) -> Result<()>;
}

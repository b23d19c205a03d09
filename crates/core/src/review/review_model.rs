//! Review workflow models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::review_errors::ReviewError;
use crate::brokers::BrokerFormat;

/// Operator decision on the record under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    /// Submit the record and move on.
    Import,
    /// Move on without submitting.
    Skip,
    /// Stop reviewing; nothing further is submitted.
    Cancel,
}

impl ReviewDecision {
    /// Interprets a free-form prompt answer.
    ///
    /// `y` imports and `n` skips; any other answer cancels the session.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => ReviewDecision::Import,
            "n" | "no" => ReviewDecision::Skip,
            _ => ReviewDecision::Cancel,
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewDecision::Import => write!(f, "import"),
            ReviewDecision::Skip => write!(f, "skip"),
            ReviewDecision::Cancel => write!(f, "cancel"),
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "import" => Ok(ReviewDecision::Import),
            "skip" => Ok(ReviewDecision::Skip),
            "cancel" => Ok(ReviewDecision::Cancel),
            _ => Err(ReviewError::InvalidDecision(s.to_string())),
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "reason", content = "message")]
pub enum TerminationReason {
    /// Every record received a decision.
    Exhausted,
    /// The operator cancelled.
    Cancelled,
    /// The service refused or could not be reached; the failed record and
    /// everything after it were abandoned.
    SubmissionFailed(String),
}

/// State of a review session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewState {
    /// Showing the record at the cursor.
    AwaitingDecision,
    Terminated(TerminationReason),
}

impl ReviewState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, ReviewState::Terminated(_))
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub broker: BrokerFormat,
    pub total: usize,
    pub submitted: usize,
    pub skipped: usize,
    /// Records dropped by a cancel or a failed submission.
    pub discarded: usize,
    pub state: ReviewState,
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} imported, {} skipped, {} discarded of {}",
            self.broker, self.submitted, self.skipped, self.discarded, self.total
        )
    }
}

use log::{debug, info, warn};
use std::collections::VecDeque;

use super::review_errors::ReviewError;
use super::review_model::{ReviewDecision, ReviewState, ReviewSummary, TerminationReason};
use super::review_traits::ActivitySubmitter;
use crate::activities::{ActivityRecord, ImportEnvelope};
use crate::brokers::BrokerFormat;
use crate::Result;

/// The review queue of one import.
///
/// The session owns the normalized records and a cursor at the front of the
/// queue. Decisions only ever pop from the front, so a record is shown at
/// most once and submitted at most once.
#[derive(Debug)]
pub struct ImportSession {
    broker: BrokerFormat,
    queue: VecDeque<ActivityRecord>,
    state: ReviewState,
    total: usize,
    submitted: usize,
    skipped: usize,
    discarded: usize,
}

impl ImportSession {
    /// Starts a session over normalized records.
    ///
    /// An empty queue starts out terminated.
    pub fn new(broker: BrokerFormat, records: Vec<ActivityRecord>) -> Self {
        let total = records.len();
        let state = if records.is_empty() {
            ReviewState::Terminated(TerminationReason::Exhausted)
        } else {
            ReviewState::AwaitingDecision
        };
        Self {
            broker,
            queue: records.into(),
            state,
            total,
            submitted: 0,
            skipped: 0,
            discarded: 0,
        }
    }

    pub fn broker(&self) -> BrokerFormat {
        self.broker
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// The record awaiting a decision, if any.
    pub fn current(&self) -> Option<&ActivityRecord> {
        match self.state {
            ReviewState::AwaitingDecision => self.queue.front(),
            ReviewState::Terminated(_) => None,
        }
    }

    /// The current record wrapped as it would be submitted.
    pub fn current_envelope(&self) -> Option<ImportEnvelope> {
        self.current().cloned().map(ImportEnvelope::single)
    }

    /// 1-based position of the current record in the original queue.
    pub fn position(&self) -> usize {
        self.total - self.queue.len() + 1
    }

    /// Records not yet decided, the current one included.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary {
            broker: self.broker,
            total: self.total,
            submitted: self.submitted,
            skipped: self.skipped,
            discarded: self.discarded,
            state: self.state.clone(),
        }
    }

    /// Applies a decision to the current record.
    ///
    /// A failed submission terminates the session and returns the
    /// submitter's error; the failed record is not retried and the rest of
    /// the queue is dropped.
    pub async fn decide(
        &mut self,
        decision: ReviewDecision,
        submitter: &dyn ActivitySubmitter,
    ) -> Result<ReviewState> {
        let Some(record) = self.current() else {
            return Err(ReviewError::SessionTerminated.into());
        };

        match decision {
            ReviewDecision::Import => {
                let envelope = ImportEnvelope::single(record.clone());
                if let Err(err) = submitter.submit(&envelope).await {
                    warn!(
                        "[{}] Submission of record {}/{} failed: {}",
                        self.broker,
                        self.position(),
                        self.total,
                        err
                    );
                    self.terminate(TerminationReason::SubmissionFailed(err.to_string()));
                    return Err(err);
                }
                debug!(
                    "[{}] Imported record {}/{}",
                    self.broker,
                    self.position(),
                    self.total
                );
                self.submitted += 1;
                self.advance();
            }
            ReviewDecision::Skip => {
                debug!(
                    "[{}] Skipped record {}/{}",
                    self.broker,
                    self.position(),
                    self.total
                );
                self.skipped += 1;
                self.advance();
            }
            ReviewDecision::Cancel => {
                info!(
                    "[{}] Import cancelled with {} records left",
                    self.broker,
                    self.queue.len()
                );
                self.terminate(TerminationReason::Cancelled);
            }
        }

        Ok(self.state.clone())
    }

    fn advance(&mut self) {
        self.queue.pop_front();
        if self.queue.is_empty() {
            self.state = ReviewState::Terminated(TerminationReason::Exhausted);
            info!("[{}] Review finished. {}", self.broker, self.summary());
        }
    }

    fn terminate(&mut self, reason: TerminationReason) {
        self.discarded += self.queue.len();
        self.queue.clear();
        self.state = ReviewState::Terminated(reason);
    }
}

use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::review_errors::ReviewError;
use super::review_model::{ReviewDecision, ReviewState};
use super::review_session::ImportSession;
use super::review_traits::ActivitySubmitter;
use crate::Result;

/// Import sessions keyed by requester.
///
/// Every requester owns at most one session. Decisions for one requester
/// are serialized by the session's mutex; sessions of different requesters
/// never share state.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<ImportSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session, replacing any earlier one for the requester.
    pub async fn start(&self, requester: &str, session: ImportSession) -> Arc<Mutex<ImportSession>> {
        let session = Arc::new(Mutex::new(session));
        let previous = self
            .sessions
            .write()
            .await
            .insert(requester.to_string(), session.clone());
        if previous.is_some() {
            debug!("Replaced the open import session of {}", requester);
        }
        session
    }

    pub async fn get(&self, requester: &str) -> Result<Arc<Mutex<ImportSession>>> {
        self.sessions
            .read()
            .await
            .get(requester)
            .cloned()
            .ok_or_else(|| ReviewError::NoSession(requester.to_string()).into())
    }

    pub async fn remove(&self, requester: &str) -> Option<Arc<Mutex<ImportSession>>> {
        self.sessions.write().await.remove(requester)
    }

    /// Applies a decision to the requester's session.
    ///
    /// Sessions that end, by exhaustion, cancel or failed submission, are
    /// dropped from the registry.
    pub async fn decide(
        &self,
        requester: &str,
        decision: ReviewDecision,
        submitter: &dyn ActivitySubmitter,
    ) -> Result<ReviewState> {
        let session = self.get(requester).await?;
        let mut guard = session.lock().await;
        let result = guard.decide(decision, submitter).await;
        let terminated = guard.is_terminated();
        drop(guard);

        if terminated {
            let mut sessions = self.sessions.write().await;
            // Only drop the entry if it still is this session
            if sessions
                .get(requester)
                .is_some_and(|current| Arc::ptr_eq(current, &session))
            {
                sessions.remove(requester);
            }
        }
        result
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

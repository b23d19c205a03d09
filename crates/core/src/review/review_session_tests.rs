//! Tests for the review state machine and the session registry.

#[cfg(test)]
mod tests {
    use crate::activities::{ActivityRecord, ActivityType, DataSource, ImportEnvelope};
    use crate::brokers::BrokerFormat;
    use crate::errors::{Error, Result};
    use crate::review::{
        ActivitySubmitter, ImportSession, ReviewDecision, ReviewError, ReviewState,
        SessionRegistry, TerminationReason,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // ============================================================================
    // Mock ActivitySubmitter
    // ============================================================================

    #[derive(Default)]
    struct MockSubmitter {
        submitted: Arc<Mutex<Vec<ImportEnvelope>>>,
        reject_symbol: Option<String>,
    }

    impl MockSubmitter {
        fn rejecting(symbol: &str) -> Self {
            Self {
                reject_symbol: Some(symbol.to_string()),
                ..Default::default()
            }
        }

        fn symbols(&self) -> Vec<String> {
            self.submitted
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| e.record().map(|r| r.symbol.clone()))
                .collect()
        }
    }

    #[async_trait]
    impl ActivitySubmitter for MockSubmitter {
        async fn submit(&self, envelope: &ImportEnvelope) -> Result<()> {
            let record = envelope.record().expect("envelope holds one record");
            if self.reject_symbol.as_deref() == Some(record.symbol.as_str()) {
                return Err(Error::RemoteRejected {
                    status: 400,
                    message: "Bad Request".to_string(),
                });
            }
            self.submitted.lock().unwrap().push(envelope.clone());
            Ok(())
        }
    }

    fn record(symbol: &str) -> ActivityRecord {
        ActivityRecord {
            account_id: "account-1".to_string(),
            currency: "USD".to_string(),
            data_source: DataSource::Yahoo,
            date: ActivityRecord::midnight(NaiveDate::from_ymd_opt(2021, 9, 15).unwrap()),
            fee: dec!(0),
            quantity: dec!(1),
            symbol: symbol.to_string(),
            activity_type: ActivityType::Buy,
            unit_price: dec!(100),
            comment: "Imported from importer script".to_string(),
        }
    }

    fn session(symbols: &[&str]) -> ImportSession {
        ImportSession::new(
            BrokerFormat::Firstrade,
            symbols.iter().map(|s| record(s)).collect(),
        )
    }

    // ============================================================================
    // ImportSession
    // ============================================================================

    #[test]
    fn test_empty_queue_starts_terminated() {
        let session = session(&[]);

        assert_eq!(
            session.state(),
            &ReviewState::Terminated(TerminationReason::Exhausted)
        );
        assert!(session.current().is_none());
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_new_session_shows_first_record() {
        let session = session(&["A", "B"]);

        assert_eq!(session.state(), &ReviewState::AwaitingDecision);
        assert_eq!(session.current().unwrap().symbol, "A");
        assert_eq!(session.position(), 1);
        assert_eq!(session.remaining(), 2);

        let envelope = session.current_envelope().unwrap();
        assert_eq!(envelope.activities.len(), 1);
    }

    #[tokio::test]
    async fn test_skip_then_import_submits_only_second() {
        let submitter = MockSubmitter::default();
        let mut session = session(&["A", "B"]);

        let state = session
            .decide(ReviewDecision::Skip, &submitter)
            .await
            .unwrap();
        assert_eq!(state, ReviewState::AwaitingDecision);
        assert_eq!(session.current().unwrap().symbol, "B");
        assert_eq!(session.position(), 2);

        let state = session
            .decide(ReviewDecision::Import, &submitter)
            .await
            .unwrap();
        assert_eq!(state, ReviewState::Terminated(TerminationReason::Exhausted));

        assert_eq!(submitter.symbols(), vec!["B"]);
        let summary = session.summary();
        assert_eq!(summary.submitted, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.discarded, 0);
    }

    #[tokio::test]
    async fn test_cancel_submits_nothing_further() {
        let submitter = MockSubmitter::default();
        let mut session = session(&["A", "B", "C"]);

        session
            .decide(ReviewDecision::Import, &submitter)
            .await
            .unwrap();
        let state = session
            .decide(ReviewDecision::Cancel, &submitter)
            .await
            .unwrap();

        assert_eq!(state, ReviewState::Terminated(TerminationReason::Cancelled));
        assert_eq!(submitter.symbols(), vec!["A"]);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.summary().discarded, 2);
    }

    #[tokio::test]
    async fn test_decision_after_termination_is_rejected() {
        let submitter = MockSubmitter::default();
        let mut session = session(&["A"]);

        session
            .decide(ReviewDecision::Cancel, &submitter)
            .await
            .unwrap();
        let err = session
            .decide(ReviewDecision::Import, &submitter)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Review(ReviewError::SessionTerminated)));
        assert!(submitter.symbols().is_empty());
    }

    #[tokio::test]
    async fn test_submission_failure_halts_session() {
        let submitter = MockSubmitter::rejecting("B");
        let mut session = session(&["A", "B", "C"]);

        session
            .decide(ReviewDecision::Import, &submitter)
            .await
            .unwrap();
        let err = session
            .decide(ReviewDecision::Import, &submitter)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RemoteRejected { status: 400, .. }));
        assert!(matches!(
            session.state(),
            ReviewState::Terminated(TerminationReason::SubmissionFailed(_))
        ));
        assert!(session.current().is_none());
        assert_eq!(submitter.symbols(), vec!["A"]);
        // The failed record and the one after it are abandoned
        assert_eq!(session.summary().discarded, 2);
    }

    #[tokio::test]
    async fn test_queue_strictly_decreases() {
        let submitter = MockSubmitter::default();
        let mut session = session(&["A", "B", "C", "D"]);
        let decisions = [
            ReviewDecision::Import,
            ReviewDecision::Skip,
            ReviewDecision::Import,
            ReviewDecision::Skip,
        ];

        let mut shown = Vec::new();
        let mut last_remaining = session.remaining();
        for decision in decisions {
            shown.push(session.current().unwrap().symbol.clone());
            session.decide(decision, &submitter).await.unwrap();
            assert!(session.remaining() < last_remaining);
            last_remaining = session.remaining();
        }

        assert_eq!(shown, vec!["A", "B", "C", "D"]);
        assert_eq!(submitter.symbols(), vec!["A", "C"]);
        assert!(session.is_terminated());
    }

    // ============================================================================
    // SessionRegistry
    // ============================================================================

    #[tokio::test]
    async fn test_registry_isolates_requesters() {
        let registry = SessionRegistry::new();
        let submitter = MockSubmitter::default();
        registry.start("alice", session(&["A1", "A2"])).await;
        registry.start("bob", session(&["B1"])).await;

        registry
            .decide("alice", ReviewDecision::Skip, &submitter)
            .await
            .unwrap();

        let bob = registry.get("bob").await.unwrap();
        assert_eq!(bob.lock().await.current().unwrap().symbol, "B1");
        let alice = registry.get("alice").await.unwrap();
        assert_eq!(alice.lock().await.current().unwrap().symbol, "A2");
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_registry_drops_finished_sessions() {
        let registry = SessionRegistry::new();
        let submitter = MockSubmitter::default();
        registry.start("alice", session(&["A1"])).await;

        let state = registry
            .decide("alice", ReviewDecision::Import, &submitter)
            .await
            .unwrap();

        assert_eq!(state, ReviewState::Terminated(TerminationReason::Exhausted));
        assert!(registry.is_empty().await);
        let err = registry
            .decide("alice", ReviewDecision::Import, &submitter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Review(ReviewError::NoSession(_))));
    }

    #[tokio::test]
    async fn test_registry_start_replaces_previous_session() {
        let registry = SessionRegistry::new();
        registry.start("alice", session(&["OLD"])).await;
        registry.start("alice", session(&["NEW"])).await;

        let session = registry.get("alice").await.unwrap();
        assert_eq!(session.lock().await.current().unwrap().symbol, "NEW");
        assert_eq!(registry.len().await, 1);
    }
}

//! Background analysis requests
//!
//! Each trigger gets a fresh request id and its own cancellation token.
//! Starting a new request cancels the one in flight, and results that carry
//! anything but the current id are dropped on arrival.

use super::mock::local_report;
use super::summary::DataSummary;
use super::{AnalysisError, AnalysisReport, DataAnalyzer};
use crate::events::{AnalysisState, EventType};
use crate::logging::LogLevel;
use crate::upload::Record;
use crate::workers::core::EventSender;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(AnalysisReport),
    /// The service failed; `fallback` is the local computation.
    Failed {
        error: AnalysisError,
        fallback: AnalysisReport,
    },
}

impl AnalysisOutcome {
    /// The report to display, whichever way it was produced.
    pub fn report(&self) -> &AnalysisReport {
        match self {
            AnalysisOutcome::Completed(report) => report,
            AnalysisOutcome::Failed { fallback, .. } => fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisUpdate {
    pub request_id: u64,
    pub outcome: AnalysisOutcome,
}

#[derive(Debug)]
struct InFlight {
    id: u64,
    token: CancellationToken,
}

pub struct AnalysisRunner {
    analyzer: Arc<dyn DataAnalyzer>,
    updates: mpsc::Sender<AnalysisUpdate>,
    events: EventSender,
    last_id: u64,
    in_flight: Option<InFlight>,
}

impl AnalysisRunner {
    pub fn new(
        analyzer: Arc<dyn DataAnalyzer>,
        updates: mpsc::Sender<AnalysisUpdate>,
        events: EventSender,
    ) -> Self {
        Self {
            analyzer,
            updates,
            events,
            last_id: 0,
            in_flight: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the request whose result will be accepted.
    pub fn current_request(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    /// Start analyzing `records`, superseding any running request.
    ///
    /// Returns the new request id, or `None` when there is nothing to analyze.
    /// Must be called from within a tokio runtime.
    pub fn trigger(&mut self, records: Arc<Vec<Record>>, file_name: String) -> Option<u64> {
        if records.is_empty() {
            return None;
        }
        self.cancel();

        self.last_id += 1;
        let id = self.last_id;
        let token = CancellationToken::new();

        // Queued before the task exists, so it always precedes the result.
        self.events
            .queue_state_change(AnalysisState::Analyzing, format!("Analyzing {}", file_name));

        let cancelled = token.clone();
        let analyzer = Arc::clone(&self.analyzer);
        let updates = self.updates.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    log::debug!("Analysis request {} cancelled", id);
                }
                result = analyzer.analyze(&records, &file_name) => {
                    let outcome = match result {
                        Ok(report) => {
                            events
                                .send_analysis_event(
                                    format!(
                                        "Analysis of {} complete: {} severity, {:.0}% confidence",
                                        file_name, report.severity, report.confidence
                                    ),
                                    EventType::Success,
                                    LogLevel::Info,
                                )
                                .await;
                            AnalysisOutcome::Completed(report)
                        }
                        Err(error) => {
                            events
                                .send_analysis_event(
                                    format!("{}; showing local analysis", error),
                                    EventType::Error,
                                    LogLevel::Warn,
                                )
                                .await;
                            let fallback =
                                local_report(&DataSummary::from_records(&records), &file_name);
                            AnalysisOutcome::Failed { error, fallback }
                        }
                    };
                    let _ = updates.send(AnalysisUpdate { request_id: id, outcome }).await;
                }
            }
        });

        self.in_flight = Some(InFlight { id, token });
        Some(id)
    }

    /// Cancel the running request, if any.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }
    }

    /// Accept an update if it belongs to the current request.
    pub fn accept(&mut self, update: AnalysisUpdate) -> Option<AnalysisOutcome> {
        match &self.in_flight {
            Some(in_flight) if in_flight.id == update.request_id => {
                self.in_flight = None;
                Some(update.outcome)
            }
            _ => {
                log::debug!("Discarding stale analysis result {}", update.request_id);
                None
            }
        }
    }
}

impl Drop for AnalysisRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MockAnalyzer, MockDataAnalyzer, Severity};
    use crate::upload::{parse_csv, template::CSV_TEMPLATE};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Analyzer whose successive calls take the scripted delays.
    struct Scripted {
        delays: Mutex<VecDeque<u64>>,
    }

    #[async_trait::async_trait]
    impl DataAnalyzer for Scripted {
        async fn analyze(
            &self,
            records: &[Record],
            file_name: &str,
        ) -> Result<AnalysisReport, AnalysisError> {
            let delay = self.delays.lock().unwrap().pop_front().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(local_report(&DataSummary::from_records(records), file_name))
        }
    }

    fn runner(
        analyzer: Arc<dyn DataAnalyzer>,
    ) -> (AnalysisRunner, mpsc::Receiver<AnalysisUpdate>) {
        let (update_tx, update_rx) = mpsc::channel(8);
        let (event_tx, _event_rx) = mpsc::channel(8);
        (
            AnalysisRunner::new(analyzer, update_tx, EventSender::new(event_tx)),
            update_rx,
        )
    }

    fn template() -> Arc<Vec<Record>> {
        Arc::new(parse_csv(CSV_TEMPLATE))
    }

    #[tokio::test]
    async fn completed_request_is_accepted() {
        let (mut runner, mut rx) = runner(Arc::new(MockAnalyzer::new(Duration::from_millis(5))));
        let id = runner.trigger(template(), "t.csv".into()).unwrap();
        assert!(runner.is_running());

        let update = rx.recv().await.unwrap();
        assert_eq!(update.request_id, id);
        let outcome = runner.accept(update).unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Completed(_)));
        assert_eq!(outcome.report().severity, Severity::Low);
        assert!(!runner.is_running());
    }

    #[tokio::test]
    async fn newer_request_supersedes_older() {
        let scripted = Scripted {
            delays: Mutex::new(VecDeque::from([200, 5])),
        };
        let (mut runner, mut rx) = runner(Arc::new(scripted));

        let first = runner.trigger(template(), "first.csv".into()).unwrap();
        let second = runner.trigger(template(), "second.csv".into()).unwrap();
        assert!(second > first);

        let update = rx.recv().await.unwrap();
        assert_eq!(update.request_id, second);
        let outcome = runner.accept(update).unwrap();
        assert!(outcome.report().narrative.contains("second.csv"));

        // The cancelled request never reports.
        let late = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(late.is_err());
    }

    #[tokio::test]
    async fn stale_updates_are_discarded() {
        let (mut runner, mut rx) = runner(Arc::new(MockAnalyzer::new(Duration::from_millis(5))));
        let first = runner.trigger(template(), "a.csv".into()).unwrap();
        let second = runner.trigger(template(), "b.csv".into()).unwrap();

        let summary = DataSummary::from_records(&template());
        let stale = AnalysisUpdate {
            request_id: first,
            outcome: AnalysisOutcome::Completed(local_report(&summary, "a.csv")),
        };
        assert_eq!(runner.accept(stale), None);
        assert_eq!(runner.current_request(), Some(second));

        let update = rx.recv().await.unwrap();
        assert!(runner.accept(update).is_some());
    }

    #[tokio::test]
    async fn service_error_falls_back_to_local_report() {
        let mut analyzer = MockDataAnalyzer::new();
        analyzer
            .expect_analyze()
            .times(1)
            .returning(|_, _| Err(AnalysisError::Service("timeout".to_string())));
        let (mut runner, mut rx) = runner(Arc::new(analyzer));

        runner.trigger(template(), "t.csv".into()).unwrap();
        let outcome = runner.accept(rx.recv().await.unwrap()).unwrap();
        match outcome {
            AnalysisOutcome::Failed { error, fallback } => {
                assert_eq!(error, AnalysisError::Service("timeout".to_string()));
                assert_eq!(fallback.confidence, 95.0);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn state_change_is_queued_before_trigger_returns() {
        let (update_tx, _update_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let mut runner = AnalysisRunner::new(
            Arc::new(MockAnalyzer::new(Duration::ZERO)),
            update_tx,
            EventSender::new(event_tx),
        );

        runner.trigger(template(), "t.csv".into()).unwrap();
        let event = event_rx.try_recv().unwrap();
        assert_eq!(event.analysis_state, Some(AnalysisState::Analyzing));
    }

    #[tokio::test]
    async fn empty_dataset_is_not_analyzed() {
        let (mut runner, _rx) = runner(Arc::new(MockAnalyzer::new(Duration::ZERO)));
        assert_eq!(runner.trigger(Arc::new(Vec::new()), "e.csv".into()), None);
        assert!(!runner.is_running());
    }
}

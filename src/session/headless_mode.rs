//! Headless mode execution

use super::{
    SessionData,
    messages::{
        SessionMessage, print_session_exit_success, print_session_shutdown,
        print_session_starting,
    },
};
use crate::analysis::{AnalysisOutcome, AnalysisReport, DataSummary, insights};
use crate::pretty::print_cmd_error;
use crate::upload::load_file;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Runs one upload + analysis pass without the terminal UI
///
/// This function handles:
/// 1. Loading and summarizing the file
/// 2. Console event logging while the analysis runs
/// 3. Ctrl+C shutdown handling
///
/// # Returns
/// * `Ok(())` - Analysis finished, or was interrupted
/// * `Err` - The file could not be loaded
pub async fn run_headless_mode(mut session: SessionData, path: &Path) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &path.display().to_string());

    let dataset = match load_file(path) {
        Ok(dataset) => dataset,
        Err(e) => {
            print_cmd_error!("Error parsing file", "{}", e);
            return Err(e.into());
        }
    };

    let summary = DataSummary::from_records(&dataset.records);
    println!(
        "{} records, {} columns ({} numeric), {} missing values",
        summary.total_records,
        summary.columns.len(),
        summary.numeric_columns.len(),
        summary.total_missing()
    );
    for insight in insights(&dataset.records) {
        println!("[{}] {}: {}", insight.kind, insight.title, insight.description);
    }

    let records = Arc::new(dataset.records);
    if session
        .runner
        .trigger(records, dataset.file_name.clone())
        .is_none()
    {
        SessionMessage::warn("No records to analyze").print();
        print_session_exit_success();
        return Ok(());
    }

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });
    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Event loop: log events to console until the analysis lands
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            Some(update) = session.analysis_receiver.recv() => {
                if let Some(outcome) = session.runner.accept(update) {
                    print_outcome(&outcome);
                    break;
                }
            }
            _ = shutdown_receiver.recv() => {
                session.runner.cancel();
                print_session_shutdown();
                break;
            }
        }
    }

    print_session_exit_success();
    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome) {
    if let AnalysisOutcome::Failed { error, .. } = outcome {
        SessionMessage::warn(format!("{}; showing local analysis", error)).print();
    }
    print_report(outcome.report());
}

fn print_report(report: &AnalysisReport) {
    println!();
    println!("{}", report.narrative);
    println!(
        "Severity: {}  Confidence: {:.0}%",
        report.severity, report.confidence
    );
    if !report.root_causes.is_empty() {
        println!("Root causes:");
        for cause in &report.root_causes {
            println!("  - {}", cause);
        }
    }
    if !report.recommendations.is_empty() {
        println!("Recommendations:");
        for rec in &report.recommendations {
            println!("  - {}", rec);
        }
    }
}

//! Data analysis
//!
//! A summary of the uploaded records feeds both the quick insight cards and
//! the (simulated) analysis service.

pub mod mock;
pub mod runner;
pub mod summary;

pub use mock::MockAnalyzer;
pub use runner::{AnalysisOutcome, AnalysisRunner, AnalysisUpdate};
pub use summary::{DataSummary, Insight, InsightKind, completeness, insights};

use crate::upload::Record;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub narrative: String,
    pub root_causes: Vec<String>,
    pub recommendations: Vec<String>,
    pub severity: Severity,
    /// Percent, 0-100.
    pub confidence: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No data to analyze")]
    EmptyDataset,

    #[error("Analysis service error: {0}")]
    Service(String),
}

/// Service that turns a dataset into an analysis report.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        records: &[Record],
        file_name: &str,
    ) -> Result<AnalysisReport, AnalysisError>;
}

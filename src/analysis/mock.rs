//! Simulated analysis service
//!
//! Waits a fixed delay, then derives a deterministic report from the data
//! summary. The same computation without the delay serves as the local
//! fallback when a service call fails.

use super::summary::DataSummary;
use super::{AnalysisError, AnalysisReport, DataAnalyzer, Severity};
use crate::upload::Record;
use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    delay: Duration,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl MockAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait::async_trait]
impl DataAnalyzer for MockAnalyzer {
    async fn analyze(
        &self,
        records: &[Record],
        file_name: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        let summary = DataSummary::from_records(records);
        tokio::time::sleep(self.delay).await;
        Ok(local_report(&summary, file_name))
    }
}

pub fn severity_for(missing_percentage: f64) -> Severity {
    if missing_percentage > 20.0 {
        Severity::High
    } else if missing_percentage > 10.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Confidence drops two points per missing percent, floored at 70.
pub fn confidence_for(missing_percentage: f64) -> f64 {
    (95.0 - missing_percentage * 2.0).max(70.0)
}

/// Deterministic report for a summary.
pub fn local_report(summary: &DataSummary, file_name: &str) -> AnalysisReport {
    let missing = summary.missing_percentage();
    let severity = severity_for(missing);
    let has_time_column = summary.has_time_column();

    let mut root_causes = Vec::new();
    let mut recommendations = Vec::new();

    if missing > 0.0 {
        root_causes.push(format!(
            "Data collection gaps: {:.1}% of data points are missing",
            missing
        ));
        recommendations
            .push("Implement data validation at source to reduce missing values".to_string());
    }
    if summary.numeric_columns.is_empty() {
        root_causes.push(
            "Limited quantitative analysis capability due to lack of numeric columns".to_string(),
        );
        recommendations
            .push("Consider adding numeric KPIs and metrics for better analysis".to_string());
    }
    if summary.total_records < 100 {
        root_causes
            .push("Small dataset size may limit statistical significance of insights".to_string());
        recommendations.push("Collect more data points to improve analysis reliability".to_string());
    }
    if !has_time_column {
        root_causes.push("Lack of temporal data limits trend analysis capabilities".to_string());
        recommendations.push("Include timestamp or date fields for temporal analysis".to_string());
    }

    if root_causes.is_empty() {
        root_causes.push("No significant data quality issues detected".to_string());
    }
    if recommendations.is_empty() {
        recommendations = [
            "Data quality appears good - consider advanced analytics and visualization",
            "Explore correlations between variables for deeper insights",
            "Consider segmentation analysis for different data subsets",
        ]
        .map(String::from)
        .to_vec();
    }

    AnalysisReport {
        narrative: narrative(summary, file_name, missing, severity, has_time_column),
        root_causes,
        recommendations,
        severity,
        confidence: confidence_for(missing),
    }
}

fn narrative(
    summary: &DataSummary,
    file_name: &str,
    missing: f64,
    severity: Severity,
    has_time_column: bool,
) -> String {
    let numeric = if summary.numeric_columns.is_empty() {
        "The dataset appears to be primarily categorical with limited numeric data.".to_string()
    } else {
        format!(
            "The dataset contains {} numeric columns ({}) suitable for quantitative analysis.",
            summary.numeric_columns.len(),
            summary.numeric_columns.join(", ")
        )
    };
    let completeness = if missing > 0.0 {
        format!(
            "Data completeness is {:.1}% with some missing values across different fields.",
            100.0 - missing
        )
    } else {
        "Data appears to be complete with no missing values detected.".to_string()
    };
    let temporal = if has_time_column {
        "Temporal data is available for trend analysis."
    } else {
        "No temporal columns detected, limiting time-based insights."
    };
    let quality = match severity {
        Severity::High => "has significant quality issues that should be addressed",
        Severity::Medium => "has moderate quality concerns",
        Severity::Low => "shows good data quality overall",
    };

    format!(
        "Analysis of {} reveals a dataset with {} records across {} columns. {} {} {} The current data structure {}.",
        file_name,
        summary.total_records,
        summary.columns.len(),
        numeric,
        completeness,
        temporal,
        quality
    )
}

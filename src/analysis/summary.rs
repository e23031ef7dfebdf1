//! Data summary and insight cards computed from uploaded records.

use crate::upload::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use strum::Display;

/// Column type inferred from its first non-missing value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    Numeric,
    Date,
    Text,
    Boolean,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_records: usize,
    /// Column names of the first record, in order.
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub missing_values: BTreeMap<String, usize>,
    pub data_types: BTreeMap<String, DataType>,
}

impl DataSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let Some(first) = records.first() else {
            return Self {
                total_records: 0,
                columns: Vec::new(),
                numeric_columns: Vec::new(),
                missing_values: BTreeMap::new(),
                data_types: BTreeMap::new(),
            };
        };
        let columns: Vec<String> = first.keys().cloned().collect();

        let numeric_columns = columns
            .iter()
            .filter(|col| records.iter().any(|r| r.get(*col).is_some_and(is_numeric)))
            .cloned()
            .collect();

        let missing_values = columns
            .iter()
            .map(|col| {
                let missing = records
                    .iter()
                    .filter(|r| is_missing(r.get(col)))
                    .count();
                (col.clone(), missing)
            })
            .collect();

        let data_types = columns
            .iter()
            .filter_map(|col| {
                let sample = records
                    .iter()
                    .filter_map(|r| r.get(col))
                    .find(|v| !is_missing(Some(*v)))?;
                Some((col.clone(), infer_type(sample)))
            })
            .collect();

        Self {
            total_records: records.len(),
            columns,
            numeric_columns,
            missing_values,
            data_types,
        }
    }

    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }

    /// Share of missing cells over `rows × columns`, in percent.
    pub fn missing_percentage(&self) -> f64 {
        let cells = self.total_records * self.columns.len();
        if cells == 0 {
            return 0.0;
        }
        self.total_missing() as f64 / cells as f64 * 100.0
    }

    /// Whether any column name mentions a date or time.
    pub fn has_time_column(&self) -> bool {
        self.columns.iter().any(|c| {
            let lower = c.to_lowercase();
            lower.contains("date") || lower.contains("time")
        })
    }
}

/// Empty strings, nulls and absent keys count as missing.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numbers, and non-empty strings that parse as a number.
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
        }
        _ => false,
    }
}

fn infer_type(value: &Value) -> DataType {
    match value {
        v if is_numeric(v) => DataType::Numeric,
        Value::String(s) if looks_like_date(s) => DataType::Date,
        Value::String(_) => DataType::Text,
        Value::Bool(_) => DataType::Boolean,
        _ => DataType::Object,
    }
}

fn looks_like_date(s: &str) -> bool {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s).is_ok()
        || ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

/// Filled cells over `rows × first-record columns`, in percent, one decimal.
pub fn completeness(records: &[Record]) -> f64 {
    (completeness_ratio(records) * 1000.0).round() / 10.0
}

/// Unrounded fraction of filled cells, in `[0, 1]` for rectangular data.
fn completeness_ratio(records: &[Record]) -> f64 {
    let Some(first) = records.first() else {
        return 0.0;
    };
    let total = first.len() * records.len();
    if total == 0 {
        return 0.0;
    }
    let filled: usize = records
        .iter()
        .map(|r| r.values().filter(|v| !is_missing(Some(*v))).count())
        .sum();
    filled as f64 / total as f64
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InsightKind {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, description: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
        }
    }
}

/// Quick insight cards shown next to the analysis.
pub fn insights(records: &[Record]) -> Vec<Insight> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let mut cards = vec![Insight::new(
        InsightKind::Info,
        "Data Volume",
        format!("Your dataset contains {} records", records.len()),
    )];

    let numeric: Vec<&str> = first
        .iter()
        .filter(|(_, v)| is_numeric(v))
        .map(|(k, _)| k.as_str())
        .collect();
    if !numeric.is_empty() {
        cards.push(Insight::new(
            InsightKind::Success,
            "Numeric Analysis Available",
            format!(
                "Found {} numeric columns: {}",
                numeric.len(),
                numeric.join(", ")
            ),
        ));
    }

    // The threshold applies to the exact ratio; only the label is rounded.
    let exact = completeness_ratio(records) * 100.0;
    let percent = completeness(records);
    cards.push(Insight::new(
        if exact > 80.0 {
            InsightKind::Success
        } else {
            InsightKind::Warning
        },
        "Data Completeness",
        format!("Your data is {:.1}% complete", percent),
    ));
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{parse_csv, template::CSV_TEMPLATE};
    use serde_json::json;

    fn grid(rows: usize, cols: usize, missing: &[(usize, usize)]) -> Vec<Record> {
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        let value = if missing.contains(&(r, c)) {
                            Value::String(String::new())
                        } else {
                            json!(format!("v{}", r * cols + c))
                        };
                        (format!("col{}", c), value)
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn completeness_of_ten_by_five_with_two_missing() {
        let records = grid(10, 5, &[(0, 1), (7, 4)]);
        assert_eq!(completeness(&records), 96.0);
    }

    #[test]
    fn completeness_of_nothing_is_zero() {
        assert_eq!(completeness(&[]), 0.0);
    }

    #[test]
    fn summary_of_template() {
        let records = parse_csv(CSV_TEMPLATE);
        let summary = DataSummary::from_records(&records);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.columns, vec!["name", "age", "email", "department", "salary"]);
        assert_eq!(summary.numeric_columns, vec!["age", "salary"]);
        assert_eq!(summary.total_missing(), 0);
        assert_eq!(summary.data_types["age"], DataType::Numeric);
        assert_eq!(summary.data_types["name"], DataType::Text);
        assert!(!summary.has_time_column());
    }

    #[test]
    fn summary_counts_missing_and_dates() {
        let records = parse_csv("order_date,amount,flag\n2024-01-05,,\n,12.5,");
        let summary = DataSummary::from_records(&records);
        assert_eq!(summary.missing_values["order_date"], 1);
        assert_eq!(summary.missing_values["amount"], 1);
        assert_eq!(summary.missing_values["flag"], 2);
        assert_eq!(summary.data_types["order_date"], DataType::Date);
        assert!(!summary.data_types.contains_key("flag"));
        assert!(summary.has_time_column());
        assert!((summary.missing_percentage() - 400.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn insight_cards() {
        let records = parse_csv(CSV_TEMPLATE);
        let cards = insights(&records);
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Data Volume", "Numeric Analysis Available", "Data Completeness"]
        );
        assert_eq!(cards[1].description, "Found 2 numeric columns: age, salary");
        assert_eq!(cards[2].kind, InsightKind::Success);
        assert_eq!(cards[2].description, "Your data is 100.0% complete");
    }

    #[test]
    fn sparse_data_gets_completeness_warning() {
        let records = grid(2, 5, &[(0, 0), (0, 1), (1, 2)]);
        let cards = insights(&records);
        let completeness = cards.last().unwrap();
        assert_eq!(completeness.kind, InsightKind::Warning);
        assert_eq!(completeness.description, "Your data is 70.0% complete");
        assert!(!cards.iter().any(|c| c.title == "Numeric Analysis Available"));
    }

    #[test]
    fn completeness_threshold_uses_exact_ratio() {
        // 2001 of 2500 cells filled: 80.04%, shown as 80.0%.
        let missing: Vec<_> = (0..499).map(|i| (i / 50, i % 50)).collect();
        let records = grid(50, 50, &missing);
        let card = insights(&records).pop().unwrap();
        assert_eq!(card.kind, InsightKind::Success);
        assert_eq!(card.description, "Your data is 80.0% complete");

        // Exactly 80% is not above the threshold.
        let missing: Vec<_> = (0..500).map(|i| (i / 50, i % 50)).collect();
        let card = insights(&grid(50, 50, &missing)).pop().unwrap();
        assert_eq!(card.kind, InsightKind::Warning);
    }

    #[test]
    fn no_records_no_insights() {
        assert!(insights(&[]).is_empty());
    }
}

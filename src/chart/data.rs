//! Chart datasets.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineDatum {
    pub date: NaiveDate,
    pub value: f64,
}

impl LineDatum {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Parse a `YYYY-MM-DD` date. Unparseable dates fall back to today.
    pub fn parse(date: &str, value: f64) -> Self {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());
        Self { date, value }
    }

    /// Midnight UTC of the date, in milliseconds since the epoch.
    pub fn timestamp_millis(&self) -> i64 {
        date_to_millis(self.date)
    }
}

pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// `%m/%d` label for a millisecond timestamp.
pub fn format_day(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%m/%d").to_string())
        .unwrap_or_default()
}

/// Six months of fixed values.
pub fn sample_bar_data() -> Vec<BarDatum> {
    [
        ("Jan", 65.0),
        ("Feb", 59.0),
        ("Mar", 80.0),
        ("Apr", 81.0),
        ("May", 56.0),
        ("Jun", 55.0),
    ]
    .into_iter()
    .map(|(label, value)| BarDatum::new(label, value))
    .collect()
}

/// Ten consecutive days from 2024-01-01 with values in `[20, 120)`.
pub fn sample_line_data<R: Rng + ?Sized>(rng: &mut R) -> Vec<LineDatum> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    start
        .iter_days()
        .take(10)
        .map(|date| LineDatum::new(date, f64::from(rng.gen_range(20u32..120))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sample_line_data_covers_ten_days() {
        let data = sample_line_data(&mut StdRng::seed_from_u64(3));
        assert_eq!(data.len(), 10);
        assert_eq!(data[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(data[9].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(data.iter().all(|d| (20.0..120.0).contains(&d.value)));
    }

    #[test]
    fn day_labels() {
        let datum = LineDatum::parse("2024-03-07", 1.0);
        assert_eq!(format_day(datum.timestamp_millis()), "03/07");
    }

    #[test]
    fn invalid_dates_fall_back_to_today() {
        let datum = LineDatum::parse("not a date", 1.0);
        assert_eq!(datum.date, Utc::now().date_naive());
    }
}

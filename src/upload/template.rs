//! Sample upload templates.

use super::FileFormat;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_TEMPLATE: &str = "name,age,email,department,salary\n\
John Doe,30,john@example.com,Engineering,75000\n\
Jane Smith,25,jane@example.com,Marketing,60000\n\
Mike Johnson,35,mike@example.com,Sales,65000";

/// The template records as pretty-printed JSON with numeric age and salary.
pub fn json_template() -> String {
    let records = json!([
        {"name": "John Doe", "age": 30, "email": "john@example.com", "department": "Engineering", "salary": 75000},
        {"name": "Jane Smith", "age": 25, "email": "jane@example.com", "department": "Marketing", "salary": 60000},
        {"name": "Mike Johnson", "age": 35, "email": "mike@example.com", "department": "Sales", "salary": 65000}
    ]);
    serde_json::to_string_pretty(&records).unwrap_or_default()
}

pub fn template(format: FileFormat) -> String {
    match format {
        FileFormat::Csv => CSV_TEMPLATE.to_string(),
        FileFormat::Json => json_template(),
    }
}

/// `sample-template.csv` / `sample-template.json`.
pub fn default_file_name(format: FileFormat) -> PathBuf {
    PathBuf::from(format!("sample-template.{}", format.extension()))
}

/// Write the template to `path`, creating parent directories.
pub fn write_template(format: FileFormat, path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, template(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{parse_csv, parse_json};
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn csv_template_round_trips() {
        let records = parse_csv(CSV_TEMPLATE);
        assert_eq!(records.len(), 3);
        for record in &records {
            let keys: Vec<_> = record.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["name", "age", "email", "department", "salary"]);
        }
        assert_eq!(records[0]["name"], Value::from("John Doe"));
        assert_eq!(records[1]["email"], Value::from("jane@example.com"));
        assert_eq!(records[2]["salary"], Value::from("65000"));
    }

    #[test]
    fn json_template_has_numeric_fields() {
        let records = parse_json(&json_template()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["age"], Value::from(30));
        assert_eq!(records[2]["department"], Value::from("Sales"));
    }

    #[test]
    fn write_template_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("t.csv");
        write_template(FileFormat::Csv, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CSV_TEMPLATE);
    }
}

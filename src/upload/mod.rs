//! Data upload
//!
//! Parses CSV and JSON files into flat records. The CSV dialect is minimal:
//! comma separated, no quoting, first line is the header.

pub mod template;

use serde_json::{Map, Value};
use std::path::Path;
use strum::{Display, EnumString};
use thiserror::Error;

/// One row of uploaded data: column name → value, in column order.
pub type Record = Map<String, Value>;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Unsupported file format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON must be an object or an array of objects")]
    NotRecords,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Format implied by the file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| UploadError::UnsupportedFormat(path.display().to_string()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }
}

/// An uploaded file after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub file_name: String,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and parse the file at `path`.
pub fn load_file(path: &Path) -> Result<Dataset, UploadError> {
    let format = FileFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let records = parse(&text, format)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    log::debug!("Parsed {} records from {}", records.len(), file_name);
    Ok(Dataset { file_name, records })
}

pub fn parse(text: &str, format: FileFormat) -> Result<Vec<Record>, UploadError> {
    match format {
        FileFormat::Csv => Ok(parse_csv(text)),
        FileFormat::Json => parse_json(text),
    }
}

/// Header line, then one record per non-blank line. Missing trailing cells
/// become `null`; extra cells are dropped.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let mut lines = text.lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut values = line.split(',').map(str::trim);
            headers
                .iter()
                .map(|header| {
                    let value = values
                        .next()
                        .map_or(Value::Null, |v| Value::String(v.to_string()));
                    (header.to_string(), value)
                })
                .collect()
        })
        .collect()
}

/// An array of objects, or a single object treated as one record.
pub fn parse_json(text: &str) -> Result<Vec<Record>, UploadError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                _ => Err(UploadError::NotRecords),
            })
            .collect(),
        Value::Object(record) => Ok(vec![record]),
        _ => Err(UploadError::NotRecords),
    }
}

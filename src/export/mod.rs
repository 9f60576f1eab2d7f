use crate::models::{EventRow, LinkSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod csv;
pub mod json;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Full analysis result bundled for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source dump the analysis was run on
    pub source: String,

    /// Distance factor that was applied to raw distances
    pub distance_factor: f64,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,

    /// Derived link summary
    pub summary: LinkSummary,

    /// Calibrated event table
    pub events: Vec<EventRow>,
}

/// Write the analysis in the requested format.
pub fn export_analysis<P: AsRef<Path>>(
    format: ExportFormat,
    report: &AnalysisReport,
    output_path: P,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => csv::export_event_rows(&report.events, output_path),
        ExportFormat::Json => json::export_report(report, output_path),
    }
}

use super::{AnalysisReport, ExportError};
use std::io::Write;
use std::path::Path;

/// Export the full analysis report to JSON format
pub fn export_report<P: AsRef<Path>>(
    report: &AnalysisReport,
    output_path: P,
) -> Result<(), ExportError> {
    let json_data = serde_json::to_string_pretty(report)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;

    Ok(())
}

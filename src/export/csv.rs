use super::ExportError;
use crate::models::EventRow;
use csv::Writer;
use std::path::Path;

/// Export the calibrated event table to CSV.
///
/// One row per event; column order follows the `EventRow` field order, so
/// the header is stable across runs. An empty table still writes the header
/// so downstream tooling always finds the columns.
pub fn export_event_rows<P: AsRef<Path>>(
    rows: &[EventRow],
    output_path: P,
) -> Result<(), ExportError> {
    let mut writer = Writer::from_path(output_path)?;

    if rows.is_empty() {
        writer.write_record([
            "event_number",
            "distance_m",
            "rel_distance_m",
            "event_loss_db",
            "slope_db_per_km",
            "section_loss_db",
            "cumulative_loss_db",
            "reflectance_db",
            "event_type",
            "event",
            "note",
            "comment",
        ])?;
    }

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush().map_err(ExportError::from)?;
    Ok(())
}

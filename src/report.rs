use crate::models::{EventRow, LinkSummary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Rows shown in the console event table when no limit is configured.
pub const DEFAULT_EVENT_LIMIT: usize = 10;

/// Display projection of an [`EventRow`] for the console table.
#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Distance (m)")]
    distance: String,
    #[tabled(rename = "Loss (dB)")]
    loss: String,
    #[tabled(rename = "Slope (dB/km)")]
    slope: String,
    #[tabled(rename = "Section (dB)")]
    section: String,
    #[tabled(rename = "Cumulative (dB)")]
    cumulative: String,
    #[tabled(rename = "Refl (dB)")]
    reflectance: String,
    #[tabled(rename = "Event")]
    event: String,
}

impl From<&EventRow> for DisplayRow {
    fn from(row: &EventRow) -> Self {
        DisplayRow {
            number: row
                .event_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            distance: format!("{:.2}", row.distance_m),
            loss: format!("{:.3}", row.event_loss_db),
            slope: format!("{:.3}", row.slope_db_per_km),
            section: format!("{:.3}", row.section_loss_db),
            cumulative: format!("{:.3}", row.cumulative_loss_db),
            reflectance: format!("{:.2}", row.reflectance_db),
            event: row.event.clone().unwrap_or_default(),
        }
    }
}

/// Render the link summary block.
pub fn render_summary(source: &str, distance_factor: f64, summary: &LinkSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("File: {}\n", source));
    out.push_str(&format!(
        "Distance factor: {} (1.0 = raw two-way kept, 0.5 = halved to one-way)\n",
        distance_factor
    ));
    out.push_str(&format!(
        "Fiber length: {:.2} m ({:.4} km)\n",
        summary.fiber_length_m, summary.fiber_length_km
    ));
    out.push_str(&format!("Total loss: {:.3} dB\n", summary.total_loss_db));

    if let Some(avg) = summary.avg_att_db_per_km {
        out.push_str(&format!("Average attenuation: {:.3} dB/km\n", avg));
    }
    if let Some(orl) = summary.optical_return_loss_db {
        out.push_str(&format!("ORL: {:.3} dB\n", orl));
    }

    out
}

/// Render the first `limit` event rows as a table.
///
/// Returns an empty string for an empty table so callers can skip the
/// section entirely.
pub fn render_event_table(rows: &[EventRow], limit: usize) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let shown = rows.len().min(limit);
    let mut table = Table::new(rows.iter().take(limit).map(DisplayRow::from));
    table.with(Style::sharp());

    let mut out = format!("Events (showing {} of {}):\n", shown, rows.len());
    out.push_str(&table.to_string());
    out.push('\n');
    out
}

use crate::models::{EventRow, LinkSummary, MeasurementBlocks};

/// Link summary derivation engine.
///
/// Total: degrades to zeros and `None`s on missing data, never fails.
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// Derive the link summary from the decoded blocks and the built rows.
    ///
    /// The device-reported `total_loss` is authoritative when present and
    /// overrides the running total; otherwise the last row's cumulative loss
    /// is used. Average attenuation is left undefined on a zero-length link
    /// rather than dividing by zero.
    pub fn summarize(blocks: &MeasurementBlocks, rows: &[EventRow]) -> LinkSummary {
        let ke = blocks.key_events.as_ref();

        let fiber_length_m = rows
            .iter()
            .map(|r| r.distance_m)
            .fold(0.0, f64::max);

        let total_loss_db = ke
            .and_then(|k| k.total_loss)
            .unwrap_or_else(|| rows.last().map(|r| r.cumulative_loss_db).unwrap_or(0.0));

        let fiber_length_km = fiber_length_m / 1000.0;
        let avg_att_db_per_km = if fiber_length_km > 0.0 {
            Some(total_loss_db / fiber_length_km)
        } else {
            None
        };

        LinkSummary {
            fiber_length_m,
            fiber_length_km,
            total_loss_db,
            avg_att_db_per_km,
            optical_return_loss_db: ke.and_then(|k| k.optical_return_loss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeyEvents;

    fn row(distance_m: f64, cumulative_loss_db: f64) -> EventRow {
        EventRow {
            event_number: None,
            distance_m,
            rel_distance_m: 0.0,
            event_loss_db: 0.0,
            slope_db_per_km: 0.0,
            section_loss_db: 0.0,
            cumulative_loss_db,
            reflectance_db: 0.0,
            event_type: None,
            event: None,
            note: None,
            comment: String::new(),
        }
    }

    fn blocks(total_loss: Option<f64>, orl: Option<f64>) -> MeasurementBlocks {
        MeasurementBlocks {
            key_events: Some(KeyEvents {
                total_loss,
                optical_return_loss: orl,
                ..KeyEvents::default()
            }),
            data_pts: None,
        }
    }

    #[test]
    fn test_empty_rows_summarize_to_zeros() {
        let summary = SummaryAggregator::summarize(&blocks(None, None), &[]);
        assert_eq!(summary.fiber_length_m, 0.0);
        assert_eq!(summary.fiber_length_km, 0.0);
        assert_eq!(summary.total_loss_db, 0.0);
        assert_eq!(summary.avg_att_db_per_km, None);
        assert_eq!(summary.optical_return_loss_db, None);
    }

    #[test]
    fn test_fiber_length_is_max_row_distance() {
        let rows = vec![row(500.0, 0.1), row(2500.0, 0.2), row(1800.0, 0.3)];
        let summary = SummaryAggregator::summarize(&blocks(None, None), &rows);
        assert_eq!(summary.fiber_length_m, 2500.0);
        assert_eq!(summary.fiber_length_km, 2.5);
    }

    #[test]
    fn test_device_total_loss_is_authoritative() {
        let rows = vec![row(1000.0, 0.1), row(2000.0, 0.45)];
        let summary = SummaryAggregator::summarize(&blocks(Some(12.5), None), &rows);
        assert_eq!(summary.total_loss_db, 12.5);
        // Average uses the authoritative figure too
        assert_eq!(summary.avg_att_db_per_km, Some(12.5 / 2.0));
    }

    #[test]
    fn test_total_loss_falls_back_to_running_total() {
        let rows = vec![row(1000.0, 0.1), row(2000.0, 0.45)];
        let summary = SummaryAggregator::summarize(&blocks(None, None), &rows);
        assert_eq!(summary.total_loss_db, 0.45);
    }

    #[test]
    fn test_zero_length_link_has_undefined_average() {
        let rows = vec![row(0.0, 0.2)];
        let summary = SummaryAggregator::summarize(&blocks(None, None), &rows);
        assert_eq!(summary.fiber_length_km, 0.0);
        assert_eq!(summary.avg_att_db_per_km, None);
    }

    #[test]
    fn test_orl_passthrough() {
        let summary = SummaryAggregator::summarize(&blocks(None, Some(-32.4)), &[]);
        assert_eq!(summary.optical_return_loss_db, Some(-32.4));
    }

    #[test]
    fn test_missing_key_events_block() {
        let rows = vec![row(1500.0, 0.3)];
        let summary = SummaryAggregator::summarize(&MeasurementBlocks::default(), &rows);
        assert_eq!(summary.fiber_length_m, 1500.0);
        assert_eq!(summary.total_loss_db, 0.3);
        assert_eq!(summary.optical_return_loss_db, None);
    }
}

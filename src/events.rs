use crate::models::{or_zero, EventRow, MeasurementBlocks, RawEvent};

/// Accumulator carried across the event scan.
///
/// `previous_distance_m` always advances to the last row's calibrated
/// distance, even when that row's relative distance was clamped, so one
/// out-of-order event cannot desynchronize the rows after it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScanState {
    pub previous_distance_m: f64,
    pub cumulative_loss_db: f64,
}

/// Event table construction engine.
///
/// Walks the decoded event list once, in order, applying the distance factor
/// and accumulating section and cumulative loss. Total: missing numeric
/// fields become 0.0, an empty event list yields an empty table.
pub struct EventTableBuilder;

impl EventTableBuilder {
    /// Build the calibrated event table from the decoded blocks.
    pub fn build(blocks: &MeasurementBlocks, distance_factor: f64) -> Vec<EventRow> {
        let Some(ke) = blocks.key_events.as_ref() else {
            return Vec::new();
        };

        let mut rows = Vec::with_capacity(ke.events.len());
        ke.events.iter().fold(ScanState::default(), |state, event| {
            let (row, next) = Self::step(state, event, distance_factor);
            rows.push(row);
            next
        });
        rows
    }

    /// Process one event: produce its row and the state for the next event.
    ///
    /// Negative relative distance (non-monotonic corrected ordering) is
    /// clamped to zero, which also zeroes that row's section loss.
    pub fn step(state: ScanState, event: &RawEvent, distance_factor: f64) -> (EventRow, ScanState) {
        let distance_m = or_zero(event.distance_of_travel) * distance_factor;
        let slope_db_per_km = or_zero(event.slope);
        let event_loss_db = or_zero(event.splice_loss);
        let reflectance_db = or_zero(event.reflection_loss);

        let rel_distance_m = (distance_m - state.previous_distance_m).max(0.0);
        let section_loss_db = slope_db_per_km * (rel_distance_m / 1000.0);
        let cumulative_loss_db = state.cumulative_loss_db + event_loss_db + section_loss_db;

        let details = event.event_type_details.as_ref();
        let row = EventRow {
            event_number: event.event_number,
            distance_m,
            rel_distance_m,
            event_loss_db,
            slope_db_per_km,
            section_loss_db,
            cumulative_loss_db,
            reflectance_db,
            event_type: event.event_type.clone(),
            event: details.and_then(|d| d.event.clone()),
            note: details.and_then(|d| d.note.clone()),
            comment: event.comment.clone().unwrap_or_default(),
        };

        let next = ScanState {
            previous_distance_m: distance_m,
            cumulative_loss_db,
        };
        (row, next)
    }
}

use serde::{Deserialize, Serialize};

/// Decoded measurement blocks as emitted by the external SOR decoder.
///
/// The decoder dumps every block it understands; only `KeyEvents` and
/// `DataPts` are consumed here. Unknown blocks and fields are ignored at
/// deserialization so decoder upgrades do not break analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBlocks {
    /// Event table block: detected splices, connectors, fiber end
    #[serde(rename = "KeyEvents")]
    pub key_events: Option<KeyEvents>,

    /// Sampled backscatter waveform block
    #[serde(rename = "DataPts")]
    pub data_pts: Option<DataPts>,
}

/// `KeyEvents` block contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyEvents {
    /// Device-reported fiber length, same distance unit as event distances
    pub fiber_length: Option<f64>,

    /// Device-reported end-to-end loss in dB (authoritative when present)
    pub total_loss: Option<f64>,

    /// Optical return loss in dB
    pub optical_return_loss: Option<f64>,

    /// Detected events, ordered by increasing raw distance
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// One decoded fiber event before distance calibration.
///
/// Every numeric field may be absent in the dump; absent measurements are
/// treated as 0.0 by the calculation engines (see [`or_zero`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Sequence position assigned by the device
    pub event_number: Option<i64>,

    /// Raw device distance; round-trip vs. one-way encoding is ambiguous
    pub distance_of_travel: Option<f64>,

    /// Attenuation rate in dB/km of the fiber section preceding this event
    pub slope: Option<f64>,

    /// Discrete loss in dB attributed to this event
    pub splice_loss: Option<f64>,

    /// Reflectance in dB, more negative = less reflective
    pub reflection_loss: Option<f64>,

    /// Categorical event code as emitted by the decoder
    pub event_type: Option<String>,

    /// Decoded description of the event code
    pub event_type_details: Option<EventTypeDetails>,

    /// Free-text comment stored on the device
    pub comment: Option<String>,
}

/// Descriptive fields decoded from the event type code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTypeDetails {
    pub event: Option<String>,
    pub note: Option<String>,
}

/// `DataPts` block: the sampled trace waveform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPts {
    /// (distance, level) sample pairs along the fiber
    #[serde(default)]
    pub data_points: Vec<(f64, f64)>,
}

/// One calibrated event-table row, immutable once built.
///
/// Field order is the stable column order for CSV export and the console
/// table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    /// Device-assigned event number (identity, not a measurement)
    pub event_number: Option<i64>,

    /// Calibrated absolute distance in meters
    pub distance_m: f64,

    /// Calibrated distance since the previous event, floored at zero
    pub rel_distance_m: f64,

    /// Discrete event loss in dB
    pub event_loss_db: f64,

    /// Section attenuation rate in dB/km
    pub slope_db_per_km: f64,

    /// Attenuation accrued over `rel_distance_m` at `slope_db_per_km`
    pub section_loss_db: f64,

    /// Running loss total through this event
    pub cumulative_loss_db: f64,

    /// Reflectance in dB
    pub reflectance_db: f64,

    /// Categorical event code, carried through unchanged
    pub event_type: Option<String>,

    /// Decoded event description
    pub event: Option<String>,

    /// Decoded event note
    pub note: Option<String>,

    /// Device comment, empty string when absent
    pub comment: String,
}

/// Per-run link summary derived from the blocks and the built rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSummary {
    /// Maximum calibrated event distance
    pub fiber_length_m: f64,

    /// Always `fiber_length_m / 1000.0`
    pub fiber_length_km: f64,

    /// Device-reported total loss when present, else the running total
    pub total_loss_db: f64,

    /// `total_loss_db / fiber_length_km`, None on a zero-length link
    pub avg_att_db_per_km: Option<f64>,

    /// Optical return loss passed through from the block
    pub optical_return_loss_db: Option<f64>,
}

/// Default-on-absence policy for optional decoded measurements.
///
/// The decoder leaves fields it could not read as `None`; the calculation
/// engines treat those as 0.0 rather than failing. Every such substitution
/// goes through this one accessor.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

impl KeyEvents {
    /// Maximum raw event distance, 0.0 when the event list is empty.
    pub fn max_event_distance(&self) -> f64 {
        self.events
            .iter()
            .map(|e| or_zero(e.distance_of_travel))
            .fold(0.0, f64::max)
    }
}

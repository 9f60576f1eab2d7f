//! Decoder-output boundary.
//!
//! The binary SOR format is parsed by an external decoder; this module only
//! consumes its documented output shape, dumped as JSON with one top-level
//! key per block. Anything unreadable here is a decoder-side failure and is
//! reported as a [`DecodeError`] rather than defaulted away.

use crate::error::{DecodeError, Result, SorTraceError};
use crate::models::{or_zero, MeasurementBlocks};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// Importer for decoded-blocks JSON dumps.
pub struct BlocksImporter;

impl BlocksImporter {
    /// Check if this importer can handle the given file.
    pub fn can_import(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    /// Load and boundary-validate a decoded dump.
    pub fn import_file(path: &Path) -> Result<MeasurementBlocks> {
        if !path.exists() {
            return Err(SorTraceError::Decode(DecodeError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let file = File::open(path)?;
        let blocks: MeasurementBlocks = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DecodeError::Malformed {
                reason: e.to_string(),
            })?;

        Self::validate(&blocks);
        Ok(blocks)
    }

    /// Parse a decoded dump from an in-memory string.
    pub fn import_str(dump: &str) -> Result<MeasurementBlocks> {
        let blocks: MeasurementBlocks =
            serde_json::from_str(dump).map_err(|e| DecodeError::Malformed {
                reason: e.to_string(),
            })?;

        Self::validate(&blocks);
        Ok(blocks)
    }

    /// Boundary checks on the decoder contract. The analysis stays total
    /// either way; violations are surfaced for diagnosis, not rejected.
    fn validate(blocks: &MeasurementBlocks) {
        let Some(ke) = blocks.key_events.as_ref() else {
            warn!("dump has no KeyEvents block; analysis will report an empty link");
            return;
        };

        let mut prev = f64::NEG_INFINITY;
        for event in &ke.events {
            let d = or_zero(event.distance_of_travel);
            if d < prev {
                warn!(
                    event_number = ?event.event_number,
                    "events are not ordered by raw distance; relative distances will be clamped"
                );
                break;
            }
            prev = d;
        }
    }
}

// Library interface for the sortrs modules
// This allows integration tests to access the core functionality

pub mod calibrate;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod report;
pub mod summary;

#[cfg(feature = "charts")]
pub mod plot;

// Re-export commonly used types for convenience
pub use calibrate::{DistanceCalibrator, DistanceMode};
pub use error::{Result, SorTraceError};
pub use events::EventTableBuilder;
pub use export::{AnalysisReport, ExportFormat};
pub use import::BlocksImporter;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{EventRow, KeyEvents, LinkSummary, MeasurementBlocks, RawEvent};
pub use summary::SummaryAggregator;

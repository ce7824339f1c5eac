//! Extraction pipeline
//!
//! Turns an ordered list of image sources into an equally long, equally
//! ordered list of [`Record`]s. Per-image failures become data in the record,
//! never errors for the caller.

mod record;
mod extraction;
mod executor;

pub use record::{PayloadOutcome, Record, ScanSummary, PAYLOAD_ERROR};
pub use extraction::ExtractionPipeline;
pub use executor::PipelineExecutor;

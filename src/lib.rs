pub mod errors;
pub mod config;
pub mod source;
pub mod decoder;
pub mod metadata;
pub mod pipeline;
pub mod output;
pub mod utils;
pub mod commands;
pub mod api;

#[cfg(test)]
mod tests;

pub use crate::api::Qrstamp;

pub use config::{OutputTarget, QuoteMode, ScanConfig};
pub use errors::{ScanError, ScanResult};
pub use pipeline::{ExtractionPipeline, PayloadOutcome, PipelineExecutor, Record, ScanSummary};
pub use metadata::TimestampOutcome;
pub use source::{FileImage, ImageSource, MemoryImage};

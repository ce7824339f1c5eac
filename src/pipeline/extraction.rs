//! Per-image extraction pipeline
//!
//! For every input: decode the QR payload, resolve the timestamp, and build
//! a [`Record`]. The two resolutions are independent and neither can fail
//! the run; every input yields exactly one record, in input order.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, info, warn};

use crate::decoder::{DecodeFailure, PixelBuffer, RqrrDecoder, SymbolDecoder};
use crate::metadata::{ExifMetadataParser, MetadataParser, TimestampOutcome, TimestampResolver};
use crate::source::ImageSource;

use super::record::{PayloadOutcome, Record};

/// Sequential extraction pipeline
pub struct ExtractionPipeline<D: SymbolDecoder, M: MetadataParser> {
    decoder: D,
    resolver: TimestampResolver<M>,
}

impl Default for ExtractionPipeline<RqrrDecoder, ExifMetadataParser> {
    fn default() -> Self {
        ExtractionPipeline::new(RqrrDecoder::new(), ExifMetadataParser::new())
    }
}

impl<D: SymbolDecoder, M: MetadataParser> ExtractionPipeline<D, M> {
    pub fn new(decoder: D, parser: M) -> Self {
        ExtractionPipeline {
            decoder,
            resolver: TimestampResolver::new(parser),
        }
    }

    /// Process one input into its record
    pub fn extract(&self, source: &dyn ImageSource) -> Record {
        let name = source.name();
        debug!("Processing {} with {} decoder", name, self.decoder.name());

        let bytes = match panic::catch_unwind(AssertUnwindSafe(|| source.read_bytes())) {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(DecodeFailure::Unreadable(e.to_string())),
            Err(_) => Err(DecodeFailure::Panicked),
        };

        let (payload, bytes) = match bytes {
            Ok(bytes) => (self.decode_payload(&bytes), Some(bytes)),
            Err(failure) => (PayloadOutcome::Failed(failure), None),
        };

        let timestamp = self.resolver.resolve(
            bytes.as_deref(),
            || source.fallback_time(),
        );

        match &payload {
            PayloadOutcome::Decoded(_) => info!("Processed: {}", name),
            PayloadOutcome::Failed(failure) => warn!("Error reading {}: {}", name, failure),
        }
        if let TimestampOutcome::Unknown = timestamp {
            warn!("Failed to extract date/time from {}", name);
        }

        Record::new(name.to_string(), payload, timestamp)
    }

    /// Process inputs in order, calling `on_record` after each one
    pub fn run_with<F>(&self, sources: &[Box<dyn ImageSource>], mut on_record: F) -> Vec<Record>
    where
        F: FnMut(&Record),
    {
        let mut records = Vec::with_capacity(sources.len());
        for source in sources {
            let record = self.extract(source.as_ref());
            on_record(&record);
            records.push(record);
        }
        records
    }

    /// Process inputs in order
    pub fn run(&self, sources: &[Box<dyn ImageSource>]) -> Vec<Record> {
        self.run_with(sources, |_| {})
    }

    fn decode_payload(&self, bytes: &[u8]) -> PayloadOutcome {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            let pixels = PixelBuffer::from_bytes(bytes)
                .map_err(|e| DecodeFailure::InvalidImage(e.to_string()))?;
            debug!("Decoded {}x{} pixels", pixels.width, pixels.height);
            self.decoder.decode(&pixels)
        }));

        match attempt {
            Ok(result) => result.into(),
            Err(_) => PayloadOutcome::Failed(DecodeFailure::Panicked),
        }
    }
}

//! Per-image output records

use std::fmt;

use crate::decoder::DecodeFailure;
use crate::metadata::TimestampOutcome;

/// Placeholder written when no QR payload could be decoded
pub const PAYLOAD_ERROR: &str = "Error reading QR code";

/// Result of decoding the QR payload of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// Decoded text
    Decoded(String),
    /// Decoding failed, with the reason
    Failed(DecodeFailure),
}

impl PayloadOutcome {
    pub fn is_decoded(&self) -> bool {
        matches!(self, PayloadOutcome::Decoded(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            PayloadOutcome::Decoded(text) => Some(text),
            PayloadOutcome::Failed(_) => None,
        }
    }

    /// CSV field text: the payload, or the error marker
    pub fn as_field(&self) -> &str {
        self.text().unwrap_or(PAYLOAD_ERROR)
    }
}

impl From<Result<String, DecodeFailure>> for PayloadOutcome {
    fn from(result: Result<String, DecodeFailure>) -> Self {
        match result {
            Ok(text) => PayloadOutcome::Decoded(text),
            Err(failure) => PayloadOutcome::Failed(failure),
        }
    }
}

/// Output row for one input image
///
/// Built once by the pipeline and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    source_name: String,
    payload: PayloadOutcome,
    timestamp: TimestampOutcome,
}

impl Record {
    pub fn new(source_name: String, payload: PayloadOutcome, timestamp: TimestampOutcome) -> Self {
        Record { source_name, payload, timestamp }
    }

    /// Record for an input whose worker task was lost before producing one
    pub fn failed(source_name: String) -> Self {
        Record::new(
            source_name,
            PayloadOutcome::Failed(DecodeFailure::Panicked),
            TimestampOutcome::Unknown,
        )
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn payload(&self) -> &PayloadOutcome {
        &self.payload
    }

    pub fn timestamp(&self) -> &TimestampOutcome {
        &self.timestamp
    }

    /// The three CSV fields: name, payload, timestamp
    pub fn to_fields(&self) -> [String; 3] {
        [
            self.source_name.clone(),
            self.payload.as_field().to_string(),
            self.timestamp.as_field(),
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.source_name, self.payload.as_field(), self.timestamp)
    }
}

/// Counts over a finished run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub decoded: usize,
    pub failed: usize,
    pub embedded_times: usize,
    pub filesystem_times: usize,
    pub unknown_times: usize,
}

impl ScanSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let mut summary = ScanSummary::default();
        for record in records {
            summary.total += 1;
            if record.payload().is_decoded() {
                summary.decoded += 1;
            } else {
                summary.failed += 1;
            }
            match record.timestamp() {
                TimestampOutcome::Embedded(_) => summary.embedded_times += 1,
                TimestampOutcome::Filesystem(_) => summary.filesystem_times += 1,
                TimestampOutcome::Unknown => summary.unknown_times += 1,
            }
        }
        summary
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} image(s): {} decoded, {} failed; timestamps: {} embedded, {} filesystem, {} unknown",
            self.total, self.decoded, self.failed,
            self.embedded_times, self.filesystem_times, self.unknown_times
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_fields_use_markers_only_for_failures() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ok = Record::new(
            "a.jpg".to_string(),
            PayloadOutcome::Decoded("ABC123".to_string()),
            TimestampOutcome::Embedded(time),
        );
        assert_eq!(ok.to_fields(), ["a.jpg", "ABC123", "2024-01-01T00:00:00.000Z"]);

        let failed = Record::failed("b.png".to_string());
        assert_eq!(failed.to_fields(), ["b.png", "Error reading QR code", "Unknown"]);
    }

    #[test]
    fn test_summary_counts() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records = vec![
            Record::new("a".into(), PayloadOutcome::Decoded("x".to_string()), TimestampOutcome::Embedded(time)),
            Record::new("b".into(), PayloadOutcome::Failed(DecodeFailure::NoSymbol), TimestampOutcome::Filesystem(time)),
            Record::failed("c".into()),
        ];

        let summary = ScanSummary::from_records(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.decoded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!((summary.embedded_times, summary.filesystem_times, summary.unknown_times), (1, 1, 1));
    }
}

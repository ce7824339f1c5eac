//! Timestamp resolution with fallbacks
//!
//! Embedded capture time first, then the time reported by the source, then
//! the unknown marker. Nothing in here returns an error.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};

use super::exif_reader::MetadataParser;

/// Placeholder written when no timestamp could be found
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Resolved timestamp of an image, tagged with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOutcome {
    /// Capture time embedded in the image
    Embedded(DateTime<Utc>),
    /// Modification or creation time reported by the source
    Filesystem(DateTime<Utc>),
    /// Neither source produced a value
    Unknown,
}

impl TimestampOutcome {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        match self {
            TimestampOutcome::Embedded(t) | TimestampOutcome::Filesystem(t) => Some(*t),
            TimestampOutcome::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TimestampOutcome::Unknown)
    }

    /// CSV field text: ISO-8601 with milliseconds, or the unknown marker
    pub fn as_field(&self) -> String {
        match self.time() {
            Some(time) => format_iso8601(&time),
            None => UNKNOWN_TIMESTAMP.to_string(),
        }
    }
}

impl fmt::Display for TimestampOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_field())
    }
}

/// Format a UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_iso8601(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resolves the timestamp of one image
pub struct TimestampResolver<M: MetadataParser> {
    parser: M,
}

impl<M: MetadataParser> TimestampResolver<M> {
    pub fn new(parser: M) -> Self {
        TimestampResolver { parser }
    }

    /// Resolve a timestamp
    ///
    /// # Arguments
    /// * `bytes` - Encoded image, or None when it could not be read
    /// * `fallback` - Produces the source-reported time, only called when needed
    pub fn resolve<F>(&self, bytes: Option<&[u8]>, fallback: F) -> TimestampOutcome
    where
        F: FnOnce() -> Option<DateTime<Utc>>,
    {
        if let Some(bytes) = bytes {
            match panic::catch_unwind(AssertUnwindSafe(|| self.parser.capture_time(bytes))) {
                Ok(Ok(Some(time))) => return TimestampOutcome::Embedded(time),
                Ok(Ok(None)) => debug!("No capture time in embedded metadata"),
                Ok(Err(e)) => debug!("No usable embedded metadata: {}", e),
                Err(_) => warn!("Metadata parser panicked, using fallback time"),
            }
        }

        match panic::catch_unwind(AssertUnwindSafe(fallback)) {
            Ok(Some(time)) => TimestampOutcome::Filesystem(time),
            Ok(None) => TimestampOutcome::Unknown,
            Err(_) => {
                warn!("Source time lookup panicked");
                TimestampOutcome::Unknown
            }
        }
    }
}

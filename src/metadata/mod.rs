//! Image timestamp resolution
//!
//! This module reads embedded capture times and combines them with the
//! source-reported time into a single [`TimestampOutcome`].

mod exif_reader;
mod timestamp;

pub use exif_reader::{exif_datetime_to_utc, ExifMetadataParser, MetadataParser};
pub use timestamp::{format_iso8601, TimestampOutcome, TimestampResolver, UNKNOWN_TIMESTAMP};

//! Embedded capture-time extraction
//!
//! Reads EXIF from any container `kamadak-exif` understands (JPEG, TIFF,
//! PNG, WebP, HEIF) and converts the capture time to UTC.

use std::io::Cursor;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use exif::{In, Tag, Value};
use log::debug;

use crate::errors::ScanResult;

/// Strategy for reading an embedded capture time
pub trait MetadataParser: Send + Sync {
    /// Capture time embedded in the encoded image, if any
    ///
    /// # Errors
    /// Fails when the image has no metadata block or the block is corrupt.
    /// `Ok(None)` means metadata exists but carries no usable time.
    fn capture_time(&self, bytes: &[u8]) -> ScanResult<Option<DateTime<Utc>>>;
}

/// Date tags in order of preference, each with its sub-second and offset companions
const CAPTURE_TAGS: [(Tag, Tag, Tag); 3] = [
    (Tag::DateTimeOriginal, Tag::SubSecTimeOriginal, Tag::OffsetTimeOriginal),
    (Tag::DateTimeDigitized, Tag::SubSecTimeDigitized, Tag::OffsetTimeDigitized),
    (Tag::DateTime, Tag::SubSecTime, Tag::OffsetTime),
];

/// EXIF capture-time reader
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifMetadataParser;

impl ExifMetadataParser {
    pub fn new() -> Self {
        ExifMetadataParser
    }
}

impl MetadataParser for ExifMetadataParser {
    fn capture_time(&self, bytes: &[u8]) -> ScanResult<Option<DateTime<Utc>>> {
        let exif = exif::Reader::new().read_from_container(&mut Cursor::new(bytes))?;

        for (date_tag, subsec_tag, offset_tag) in CAPTURE_TAGS {
            let Some(raw) = ascii_field(&exif, date_tag) else {
                continue;
            };

            let mut datetime = match exif::DateTime::from_ascii(raw) {
                Ok(datetime) => datetime,
                Err(e) => {
                    debug!("Ignoring unparseable {}: {}", date_tag, e);
                    continue;
                }
            };

            // Companion tags refine the value but never invalidate it
            if let Some(subsec) = ascii_field(&exif, subsec_tag) {
                if let Err(e) = datetime.parse_subsec(subsec) {
                    debug!("Ignoring unparseable {}: {}", subsec_tag, e);
                }
            }
            if let Some(offset) = ascii_field(&exif, offset_tag) {
                if let Err(e) = datetime.parse_offset(offset) {
                    debug!("Ignoring unparseable {}, assuming UTC: {}", offset_tag, e);
                }
            }

            match exif_datetime_to_utc(&datetime) {
                Some(utc) => {
                    debug!("Using {} = {}", date_tag, datetime);
                    return Ok(Some(utc));
                }
                None => debug!("Ignoring out-of-range {} = {}", date_tag, datetime),
            }
        }

        Ok(None)
    }
}

/// First ASCII value of a primary-image field
fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<&[u8]> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref values) => values.first().map(Vec::as_slice),
        _ => None,
    }
}

/// Convert an EXIF date-time to UTC
///
/// A value without an offset tag is taken as UTC. Returns None for
/// placeholder values such as `0000:00:00 00:00:00`.
pub fn exif_datetime_to_utc(datetime: &exif::DateTime) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(
        i32::from(datetime.year),
        u32::from(datetime.month),
        u32::from(datetime.day),
    )?
    .and_hms_nano_opt(
        u32::from(datetime.hour),
        u32::from(datetime.minute),
        u32::from(datetime.second),
        datetime.nanosecond.unwrap_or(0),
    )?;

    match datetime.offset {
        Some(minutes) => {
            let offset = FixedOffset::east_opt(i32::from(minutes) * 60)?;
            offset
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.with_timezone(&Utc))
        }
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[u8]) -> exif::DateTime {
        exif::DateTime::from_ascii(raw).unwrap()
    }

    #[test]
    fn test_naive_value_is_utc() {
        let utc = exif_datetime_to_utc(&parse(b"2023:05:01 10:00:00")).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_offset_and_subsec_are_applied() {
        let mut datetime = parse(b"2023:05:01 12:00:00");
        datetime.parse_offset(b"+02:00").unwrap();
        datetime.parse_subsec(b"25").unwrap();

        let utc = exif_datetime_to_utc(&datetime).unwrap();
        assert_eq!(utc.to_rfc3339(), "2023-05-01T10:00:00.250+00:00");
    }

    #[test]
    fn test_malformed_offset_leaves_time_as_utc() {
        let mut datetime = parse(b"2023:05:01 12:00:00");
        assert!(datetime.parse_offset(b"GMT+2").is_err());

        let utc = exif_datetime_to_utc(&datetime).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_placeholder_date_is_rejected() {
        // Either the tag parser or the conversion must refuse it
        if let Ok(datetime) = exif::DateTime::from_ascii(b"0000:00:00 00:00:00") {
            assert!(exif_datetime_to_utc(&datetime).is_none());
        }
    }

    #[test]
    fn test_non_image_bytes_are_an_error() {
        assert!(ExifMetadataParser::new().capture_time(b"plain text").is_err());
    }
}

//! EXIF metadata needed before an image can be aligned: the orientation the
//! camera recorded and the moment the frame was captured.

use std::io::Cursor;

use chrono::NaiveDateTime;
use exif::{Exif, In, Reader, Tag, Value};

use super::Orientation;

/// EXIF date/time layout (`YYYY:MM:DD HH:MM:SS`).
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Tags consulted for the capture time, most specific first.
const CAPTURE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

fn read_exif(bytes: &[u8]) -> Option<Exif> {
    let mut cursor = Cursor::new(bytes);
    Reader::new().read_from_container(&mut cursor).ok()
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    read_exif(bytes)
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Read the capture time of a photograph from its EXIF block.
///
/// `DateTimeOriginal` wins; `DateTimeDigitized` and the generic `DateTime`
/// tag are used when the camera did not write it. EXIF times carry no zone,
/// so the result is a naive local timestamp.
///
/// Returns `None` when the file has no EXIF data or none of the tags parse.
pub fn read_capture_timestamp(bytes: &[u8]) -> Option<NaiveDateTime> {
    let exif = read_exif(bytes)?;
    capture_timestamp(&exif)
}

fn capture_timestamp(exif: &Exif) -> Option<NaiveDateTime> {
    CAPTURE_TAGS.iter().find_map(|tag| {
        exif.get_field(*tag, In::PRIMARY)
            .and_then(|field| parse_exif_datetime(&field.value))
    })
}

fn exif_string(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(values) => values
            .first()
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .map(|s| s.trim_matches('\u{0}').trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

fn parse_exif_datetime(value: &Value) -> Option<NaiveDateTime> {
    let raw = exif_string(value)?;
    NaiveDateTime::parse_from_str(&raw, EXIF_DATETIME_FORMAT).ok()
}

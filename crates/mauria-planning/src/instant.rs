//! Timestamp normalization and parsing.
//!
//! The portal emits RFC 3339 datetimes whose numeric offset sometimes lacks
//! the colon (`+0200` instead of `+02:00`).  Those must be rewritten before
//! parsing.

use chrono::{DateTime, FixedOffset};

/// Rewrite a trailing colonless numeric offset (`±HHMM`) into colon form
/// (`±HH:MM`).  Strings without such a tail come back unchanged.
pub fn normalize_offset(raw: &str) -> String {
    if raw.len() < 6 || !raw.is_char_boundary(raw.len() - 5) {
        return raw.to_string();
    }

    let (head, tail) = raw.split_at(raw.len() - 5);
    let bytes = tail.as_bytes();
    let signed = bytes[0] == b'+' || bytes[0] == b'-';
    if signed && bytes[1..].iter().all(u8::is_ascii_digit) {
        format!("{head}{}:{}", &tail[..3], &tail[3..])
    } else {
        raw.to_string()
    }
}

/// Parse a portal timestamp into a timezone-aware instant, normalizing the
/// offset first.  Anything unparsable yields `None`.
pub fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&normalize_offset(raw)).ok()
}

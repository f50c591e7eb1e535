use super::{fields, Table};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Everything except digits, hyphens, colons, and spaces.
static NON_TIMESTAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9-: ]").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    // stripping punctuation from slash-separated dates leaves these
    "%Y%m%d %H:%M:%S",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Strips a raw timestamp cell down to the characters a date-time can
/// legitimately contain.
pub fn clean_timestamp_text(raw: &str) -> String {
    NON_TIMESTAMP.replace_all(raw, "").trim().to_string()
}

/// Parses cleaned timestamp text; `None` when no accepted shape matches.
pub fn parse_timestamp(cleaned: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Cleans and parses every TimeStamp cell. Unparsable values leave the
/// parsed timestamp unset; the row survives.
#[tracing::instrument(level = "debug", skip(table))]
pub fn timestamps(mut table: Table) -> Table {
    let mut unparsed = 0usize;
    for record in &mut table {
        let cleaned = clean_timestamp_text(record.get(fields::TIME_STAMP));
        record.timestamp = parse_timestamp(&cleaned);
        if record.timestamp.is_none() {
            unparsed += 1;
        }
        record.set(fields::TIME_STAMP, cleaned);
    }
    if unparsed > 0 {
        warn!(unparsed, "timestamp cells failed to parse");
    }
    table
}

//! Time related utils.

use crate::{Error, Result};

/// DateTime is the alias of `chrono::DateTime<chrono::Utc>`.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Time format used in signatures: "2021-01-01T00:00:00Z"
///
/// Second precision with a literal `Z` suffix, not an offset.
const ISO8601: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Return the current time in UTC.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format time into ISO 8601 with separators: "2021-01-01T00:00:00Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse an ISO 8601 string like "2021-01-01T00:00:00Z" back into a time.
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    let t = chrono::NaiveDateTime::parse_from_str(s, ISO8601)
        .map_err(|e| Error::unexpected(format!("parse {s} into ISO 8601 failed")).with_source(e))?;
    Ok(t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso8601() {
        let t = parse_iso8601("2021-01-01T00:00:00Z").expect("must parse");
        assert_eq!(format_iso8601(t), "2021-01-01T00:00:00Z");
    }

    #[test]
    fn test_format_drops_subsecond_precision() {
        let t = parse_iso8601("2022-03-13T07:20:04Z").expect("must parse")
            + chrono::TimeDelta::milliseconds(999);
        assert_eq!(format_iso8601(t), "2022-03-13T07:20:04Z");
    }

    #[test]
    fn test_parse_rejects_offset() {
        assert!(parse_iso8601("2021-01-01T00:00:00+09:00").is_err());
    }
}

use chrono::{DateTime, NaiveDate, Utc};

/// Parses a `lastUpdated` value. Accepts plain dates (`2025-01-15`) and
/// RFC 3339 timestamps; anything else is `None`.
pub fn parse_updated(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// RFC 1123 form used by RSS, e.g. `Wed, 15 Jan 2025 00:00:00 GMT`.
pub fn rfc1123(dt: DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

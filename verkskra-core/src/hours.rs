use chrono::{NaiveTime, Timelike};

/// Decimal hours between two clock times, rounded to two decimals and
/// clamped at zero. An end before the start counts as nothing worked, not
/// as a wrap into the next day.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> f64 {
    let start_minutes = (start.hour() * 60 + start.minute()) as i64;
    let end_minutes = (end.hour() * 60 + end.minute()) as i64;
    round2((end_minutes - start_minutes) as f64 / 60.0).max(0.0)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a `"HH:MM"` clock time.
pub fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

//! Import reconciliation: a pasted JSON payload, in either the legacy
//! Icelandic field names or their English equivalents, is normalized into
//! ledger entries. Nothing is applied when parsing fails.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{new_id, today, MaterialEntry, WorkEntry};
use crate::hours::{hours_between, parse_hhmm, round2};

const FALLBACK_START: &str = "08:00";
const FALLBACK_END: &str = "16:00";

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Normalized records produced from one import payload, ready to be
/// appended to a project in a single update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportBatch {
    pub materials: Vec<MaterialEntry>,
    pub work_entries: Vec<WorkEntry>,
}

impl ImportBatch {
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.work_entries.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(alias = "efni")]
    materials: Option<Vec<RawMaterial>>,
    #[serde(rename = "work-sessions", alias = "vinna")]
    work_sessions: Option<Vec<RawWork>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMaterial {
    #[serde(alias = "dags")]
    date: Option<String>,
    #[serde(alias = "heiti")]
    name: Option<String>,
    #[serde(alias = "magn")]
    quantity: Option<Value>,
    #[serde(alias = "verd")]
    amount: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWork {
    #[serde(alias = "dags")]
    date: Option<String>,
    #[serde(alias = "byrjun")]
    start: Option<String>,
    #[serde(alias = "lok")]
    end: Option<String>,
    #[serde(alias = "stundir")]
    hours: Option<Value>,
    #[serde(alias = "athugasemd")]
    notes: Option<String>,
}

/// Parse a raw import payload into normalized records.
///
/// Materials: fresh id, date defaulting to today, empty name/quantity,
/// amount coerced to a number (0 on failure). Work sessions: fresh id,
/// date defaulting to today, the fixed fallback times when absent, and
/// hours taken from an explicit value when one is supplied, otherwise
/// computed from the start/end pair.
pub fn parse_import(raw: &str) -> Result<ImportBatch, ImportError> {
    let payload: RawPayload = serde_json::from_str(raw)?;
    let today = today();

    let mut batch = ImportBatch::default();
    for material in payload.materials.unwrap_or_default() {
        batch.materials.push(MaterialEntry {
            id: new_id(),
            date: parse_date_or(material.date.as_deref(), today),
            name: material.name.unwrap_or_default(),
            quantity: as_text(material.quantity),
            amount: as_number(material.amount.as_ref()).unwrap_or(0.0),
        });
    }
    for work in payload.work_sessions.unwrap_or_default() {
        let start = parse_time_or(work.start.as_deref(), FALLBACK_START);
        let end = parse_time_or(work.end.as_deref(), FALLBACK_END);
        let hours = match as_number(work.hours.as_ref()) {
            Some(explicit) => round2(explicit.max(0.0)),
            None => hours_between(start, end),
        };
        batch.work_entries.push(WorkEntry {
            id: new_id(),
            date: parse_date_or(work.date.as_deref(), today),
            start: Some(start),
            end: Some(end),
            hours,
            notes: work.notes.unwrap_or_default(),
        });
    }

    Ok(batch)
}

fn parse_date_or(raw: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or(fallback)
}

fn parse_time_or(raw: Option<&str>, fallback: &str) -> NaiveTime {
    raw.and_then(parse_hhmm)
        .or_else(|| parse_hhmm(fallback))
        .unwrap_or_default()
}

fn as_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icelandic_payload_normalizes_both_arrays() {
        let raw = r#"{"efni":[{"heiti":"Tiles","magn":"10 m2","verd":50000}],
                      "vinna":[{"dags":"2024-01-15","stundir":8}]}"#;
        let batch = parse_import(raw).unwrap();

        assert_eq!(batch.materials.len(), 1);
        let material = &batch.materials[0];
        assert_eq!(material.name, "Tiles");
        assert_eq!(material.quantity, "10 m2");
        assert_eq!(material.amount, 50_000.0);

        assert_eq!(batch.work_entries.len(), 1);
        let work = &batch.work_entries[0];
        assert_eq!(work.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(work.hours, 8.0);
        assert_eq!(work.start, parse_hhmm("08:00"));
        assert_eq!(work.end, parse_hhmm("16:00"));
        assert_eq!(work.notes, "");
    }

    #[test]
    fn english_keys_are_accepted_too() {
        let raw = r#"{"materials":[{"name":"Paint","quantity":"4 l","amount":"7990"}],
                      "work-sessions":[{"date":"2024-03-01","start":"10:00","end":"14:30","notes":"sanding"}]}"#;
        let batch = parse_import(raw).unwrap();

        assert_eq!(batch.materials[0].name, "Paint");
        assert_eq!(batch.materials[0].amount, 7_990.0);

        let work = &batch.work_entries[0];
        assert_eq!(work.hours, 4.5);
        assert_eq!(work.notes, "sanding");
    }

    #[test]
    fn hours_computed_from_times_when_no_explicit_value() {
        let raw = r#"{"vinna":[{"byrjun":"09:00","lok":"17:30"}]}"#;
        let batch = parse_import(raw).unwrap();
        assert_eq!(batch.work_entries[0].hours, 8.5);
    }

    #[test]
    fn explicit_zero_hours_is_honored() {
        let raw = r#"{"vinna":[{"byrjun":"09:00","lok":"17:30","stundir":0}]}"#;
        let batch = parse_import(raw).unwrap();
        assert_eq!(batch.work_entries[0].hours, 0.0);
    }

    #[test]
    fn unparseable_amount_defaults_to_zero() {
        let raw = r#"{"efni":[{"heiti":"Skrúfur","verd":"ókeypis"}]}"#;
        let batch = parse_import(raw).unwrap();
        assert_eq!(batch.materials[0].amount, 0.0);
        assert_eq!(batch.materials[0].quantity, "");
    }

    #[test]
    fn missing_date_falls_back_to_today() {
        let raw = r#"{"efni":[{"heiti":"Sandur"}]}"#;
        let batch = parse_import(raw).unwrap();
        assert_eq!(batch.materials[0].date, crate::domain::today());
    }

    #[test]
    fn numeric_quantity_is_kept_as_text() {
        let raw = r#"{"efni":[{"heiti":"Plötur","magn":12}]}"#;
        let batch = parse_import(raw).unwrap();
        assert_eq!(batch.materials[0].quantity, "12");
    }

    #[test]
    fn malformed_json_is_a_single_error() {
        assert!(parse_import("not json at all").is_err());
        assert!(parse_import(r#"{"vinna": 3}"#).is_err());
    }

    #[test]
    fn empty_object_yields_an_empty_batch() {
        let batch = parse_import("{}").unwrap();
        assert!(batch.is_empty());
    }
}

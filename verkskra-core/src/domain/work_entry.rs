use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One recorded work session with a derived duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "startTime", with = "hhmm")]
    pub start: Option<NaiveTime>,
    #[serde(rename = "endTime", with = "hhmm")]
    pub end: Option<NaiveTime>,
    pub hours: f64,
    pub notes: String,
}

impl WorkEntry {
    /// A fresh entry for today with no recorded times.
    pub fn blank() -> Self {
        Self {
            id: super::new_id(),
            date: super::today(),
            start: None,
            end: None,
            hours: 0.0,
            notes: String::new(),
        }
    }

    /// Recompute `hours` from the start/end pair. A missing time yields 0.
    pub fn recompute_hours(&mut self) {
        self.hours = match (self.start, self.end) {
            (Some(start), Some(end)) => crate::hours::hours_between(start, end),
            _ => 0.0,
        };
    }
}

/// Clock times travel as `"HH:MM"`, with the empty string standing in for
/// a time that was never recorded.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map(Some)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_round_trip_as_hhmm() {
        let mut entry = WorkEntry::blank();
        entry.start = NaiveTime::from_hms_opt(9, 0, 0);
        entry.end = NaiveTime::from_hms_opt(17, 30, 0);
        entry.recompute_hours();

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "17:30");

        let back: WorkEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn missing_times_serialize_as_empty_strings() {
        let entry = WorkEntry::blank();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["startTime"], "");
        assert_eq!(json["endTime"], "");

        let back: WorkEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.start, None);
        assert_eq!(back.end, None);
    }

    #[test]
    fn recompute_with_missing_time_is_zero() {
        let mut entry = WorkEntry::blank();
        entry.start = NaiveTime::from_hms_opt(9, 0, 0);
        entry.hours = 4.0;
        entry.recompute_hours();
        assert_eq!(entry.hours, 0.0);
    }
}

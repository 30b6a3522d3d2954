//! Calendar events as delivered by the events endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An event with a start and end moment plus an arbitrary payload.
///
/// `start` and `end` accept RFC 3339 strings (read as wall-clock time in their
/// own offset), naive ISO date-times, plain dates (midnight) or epoch
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(deserialize_with = "deserialize_moment")]
    pub start: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_moment")]
    pub end: NaiveDateTime,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl CalendarEvent {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            payload: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// `title` from the payload, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMoment {
    Millis(i64),
    Text(String),
}

fn deserialize_moment<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match RawMoment::deserialize(deserializer)? {
        RawMoment::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {ms} out of range"))),
        RawMoment::Text(text) => parse_moment(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date/time '{text}'"))),
    }
}

fn parse_moment(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

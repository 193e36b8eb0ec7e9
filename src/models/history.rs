use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One answered query, as stored in `history.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub response: String,
    /// Written as an RFC 3339 string. Older logs store Unix seconds as text
    /// (`"1700000000.5"`), which is still accepted.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time
    pub fn now(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self { query: query.into(), response: response.into(), timestamp: Utc::now() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Seconds(f64),
}

/// Accept RFC 3339 or Unix seconds, as a string or a number
///
/// A value that is neither maps to the Unix epoch so one odd entry never makes the
/// whole log unreadable.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamp = match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => parse_timestamp(&text),
        RawTimestamp::Seconds(seconds) => from_unix_seconds(seconds),
    };
    Ok(timestamp.unwrap_or(DateTime::UNIX_EPOCH))
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(from_unix_seconds))
}

fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

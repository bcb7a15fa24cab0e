use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

/// The two fields of a document the indexing decision logic inspects.
///
/// The rest of the document body is opaque to docfeed and travels to
/// the backend as the raw source the file was read with.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DocumentRecord {
    pub identifier: String,

    /// Authoritative logical update time of the document.
    #[serde(
        rename = "lastUpdateDate",
        deserialize_with = "deserialize_last_update_date"
    )]
    pub last_update_date: DateTime<Utc>,
}

impl DocumentRecord {
    /// Logical update time as UTC epoch milliseconds, the unit the
    /// checkpoint comparison works in.
    pub fn last_update_ms(&self) -> i64 {
        self.last_update_date.timestamp_millis()
    }
}

/// Accepted `lastUpdateDate` shapes: epoch milliseconds, RFC 3339, or
/// a bare `YYYY-MM-DD` date (midnight UTC).
#[derive(Deserialize)]
#[serde(untagged)]
enum LastUpdateRepr {
    Millis(i64),
    Text(String),
}

fn deserialize_last_update_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match LastUpdateRepr::deserialize(deserializer)? {
        LastUpdateRepr::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        LastUpdateRepr::Text(text) => parse_date_text(&text)
            .ok_or_else(|| de::Error::custom(format!("unparseable lastUpdateDate: {text:?}"))),
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

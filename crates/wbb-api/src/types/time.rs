use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional timestamp given as RFC 3339 text or epoch seconds/millis.
pub(super) fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;

    match value {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| D::Error::custom(format!("invalid RFC3339 timestamp: {e}"))),
        Some(Value::Number(num)) => {
            let raw = num
                .as_i64()
                .ok_or_else(|| D::Error::custom("expected integer timestamp"))?;

            // 10-digit values are seconds, 13+ are milliseconds.
            let millis = if raw.unsigned_abs() < 1_000_000_000_000 {
                raw.saturating_mul(1000)
            } else {
                raw
            };

            DateTime::<Utc>::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom("timestamp out of range"))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected timestamp, got {other}"
        ))),
    }
}

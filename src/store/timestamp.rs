//! Centralized timestamp conversion between documents and native dates.
//!
//! Documents carry timestamps as epoch milliseconds. Decoding also accepts
//! RFC 3339 strings and `{seconds, nanos}` maps, the encodings earlier app
//! versions wrote, so old records keep loading. All model fields go
//! through the serde modules here; nothing else converts timestamps.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Encodes a timestamp the way new documents store it.
pub fn to_value(ts: DateTime<Utc>) -> Value {
    Value::from(ts.timestamp_millis())
}

/// Decodes any of the three historical encodings.
pub fn from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(map) => {
            let seconds = map.get("seconds")?.as_i64()?;
            let nanos = map
                .get("nanos")
                .and_then(Value::as_i64)
                .unwrap_or(0)
                .clamp(0, 999_999_999) as u32;
            Utc.timestamp_opt(seconds, nanos).single()
        }
        _ => None,
    }
}

/// Serde adapter for required `DateTime<Utc>` fields.
pub mod ts_millis {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(ts.timestamp_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        super::from_value(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}

/// Serde adapter for optional timestamp fields. Pair with
/// `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub mod ts_millis_option {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_i64(ts.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => super::from_value(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn millis_round_trip() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let encoded = to_value(ts);
        assert_eq!(encoded, json!(ts.timestamp_millis()));
        assert_eq!(from_value(&encoded), Some(ts));
    }

    #[test]
    fn decodes_rfc3339_strings() {
        let decoded = from_value(&json!("2023-07-01T12:00:00Z")).unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(2023, 7, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn decodes_seconds_nanos_maps() {
        let decoded = from_value(&json!({"seconds": 1_700_000_000, "nanos": 500_000_000})).unwrap();
        assert_eq!(decoded.timestamp(), 1_700_000_000);
        assert_eq!(decoded.timestamp_subsec_millis(), 500);

        // nanos may be absent
        let decoded = from_value(&json!({"seconds": 1_700_000_000})).unwrap();
        assert_eq!(decoded.timestamp(), 1_700_000_000);
    }

    #[test]
    fn rejects_unknown_encodings() {
        assert_eq!(from_value(&json!(true)), None);
        assert_eq!(from_value(&json!(null)), None);
        assert_eq!(from_value(&json!("not a date")), None);
        assert_eq!(from_value(&json!({"sec": 1})), None);
    }
}

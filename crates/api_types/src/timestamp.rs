//! Serde support for the store's `date` field.
//!
//! The store emits either an epoch-millisecond integer or an ISO-8601 string
//! depending on its version; both forms must deserialize. Serialization
//! always produces RFC 3339.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserializer, Serializer, de};

pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    struct TimestampVisitor;

    impl de::Visitor<'_> for TimestampVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an ISO-8601 string or epoch milliseconds")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            DateTime::parse_from_rfc3339(v)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Utc.timestamp_millis_opt(v)
                .single()
                .ok_or_else(|| E::custom("epoch milliseconds out of range"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            let ms = i64::try_from(v).map_err(E::custom)?;
            self.visit_i64(ms)
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Datelike, Utc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Dated {
        #[serde(with = "crate::timestamp")]
        date: DateTime<Utc>,
    }

    #[test]
    fn parses_rfc3339_strings() {
        let dated: Dated = serde_json::from_str(r#"{"date": "2024-03-05T10:30:00Z"}"#).unwrap();
        assert_eq!(dated.date.year(), 2024);
        assert_eq!(dated.date.month(), 3);
        assert_eq!(dated.date.day(), 5);
    }

    #[test]
    fn parses_epoch_milliseconds() {
        // 2024-04-01T00:00:00Z
        let dated: Dated = serde_json::from_str(r#"{"date": 1711929600000}"#).unwrap();
        assert_eq!(dated.date.year(), 2024);
        assert_eq!(dated.date.month(), 4);
        assert_eq!(dated.date.day(), 1);
    }

    #[test]
    fn rejects_non_dates() {
        assert!(serde_json::from_str::<Dated>(r#"{"date": "yesterday"}"#).is_err());
    }
}

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{macros::format_description, Date, OffsetDateTime, UtcOffset};

const DATE_ONLY: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// A point in time attached to a record. It may be invalid: reviving text
/// that is not a recognizable date never fails, it yields an invalid value
/// that serializes back as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RecordDate(Option<OffsetDateTime>);

impl RecordDate {
    pub fn now() -> Self {
        Self(Some(OffsetDateTime::now_utc()))
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    /// Instants outside years 0..=9999 have no RFC 3339 form and are invalid.
    pub fn from_datetime(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        if (0..=9999).contains(&utc.year()) {
            Self(Some(utc))
        } else {
            Self::invalid()
        }
    }

    /// Revives a date from its textual form: RFC 3339, a bare `YYYY-MM-DD`
    /// (midnight UTC), or a number of epoch milliseconds.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(value) = OffsetDateTime::parse(text, &Rfc3339) {
            return Self::from_datetime(value);
        }
        if let Ok(date) = Date::parse(text, DATE_ONLY) {
            return Self::from_datetime(date.midnight().assume_utc());
        }
        match text.parse::<i64>() {
            Ok(millis) => Self::from_epoch_millis(millis),
            Err(_) => Self::invalid(),
        }
    }

    pub fn from_epoch_millis(millis: i64) -> Self {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map(Self::from_datetime)
            .unwrap_or_default()
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::parse(text),
            Value::Number(number) => match number.as_i64() {
                Some(millis) => Self::from_epoch_millis(millis),
                None => number
                    .as_f64()
                    .filter(|millis| millis.is_finite())
                    .map(|millis| Self::from_epoch_millis(millis.trunc() as i64))
                    .unwrap_or_default(),
            },
            _ => Self::invalid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Calendar day of the date in UTC, used for grouping.
    pub fn ymd(&self) -> Option<(i32, u8, u8)> {
        self.0
            .map(|dt| (dt.year(), u8::from(dt.month()), dt.day()))
    }

    fn to_text(self) -> Option<String> {
        self.0.and_then(|dt| dt.format(&Rfc3339).ok())
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_text() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn revives_iso_timestamps_in_utc() {
        let date = RecordDate::parse("2024-05-01T12:30:00.250+02:00");
        assert!(date.is_valid());
        assert_eq!(date.ymd(), Some((2024, 5, 1)));
        assert_eq!(date.to_string(), "2024-05-01T10:30:00.25Z");
    }

    #[test]
    fn revives_date_only_and_epoch_millis() {
        assert_eq!(RecordDate::parse("1990-02-14").ymd(), Some((1990, 2, 14)));
        let from_number = RecordDate::from_value(&json!(86_400_000));
        assert_eq!(from_number.ymd(), Some((1970, 1, 2)));
    }

    #[test]
    fn garbage_text_yields_invalid_date() {
        let date = RecordDate::parse("next tuesday-ish");
        assert!(!date.is_valid());
        assert_eq!(date.ymd(), None);
        assert_eq!(serde_json::to_value(date).unwrap(), Value::Null);
        assert!(!RecordDate::from_value(&Value::Null).is_valid());
    }

    #[test]
    fn years_outside_rfc3339_range_are_invalid() {
        assert!(!RecordDate::from_epoch_millis(-70_000_000_000_000).is_valid());
        assert!(!RecordDate::from_epoch_millis(-62_167_219_200_001).is_valid());
        assert!(!RecordDate::from_epoch_millis(253_402_300_800_000).is_valid());

        let first = RecordDate::from_epoch_millis(-62_167_219_200_000);
        assert_eq!(first.ymd(), Some((0, 1, 1)));
        let last = RecordDate::from_epoch_millis(253_402_300_799_999);
        assert_eq!(last.ymd(), Some((9999, 12, 31)));
        for date in [first, last] {
            let encoded = serde_json::to_string(&date).unwrap();
            let decoded: RecordDate = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, date);
        }
    }

    #[test]
    fn serialized_text_revives_to_same_instant() {
        let original = RecordDate::parse("2023-11-05T08:15:42.123456789Z");
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: RecordDate = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }
}

// Liberal timestamp parsing for client-supplied `eventDate` values

use bson::Bson;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Interprets a stored `eventDate` value as a UTC timestamp.
///
/// Clients send dates as free-form JSON, so the stored value can be an
/// ISO-8601 string, a bare date, an epoch-milliseconds number, a real BSON
/// datetime, or garbage. Every recognized shape is normalized to UTC;
/// anything unrecognizable yields `None`, and callers treat such events as
/// never upcoming.
pub fn event_timestamp(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => Some(dt.to_chrono()),
        Bson::String(s) => parse_date_string(s),
        Bson::Int32(ms) => from_epoch_millis(i64::from(*ms)),
        Bson::Int64(ms) => from_epoch_millis(*ms),
        Bson::Double(ms) if ms.is_finite() => from_epoch_millis(*ms as i64),
        _ => None,
    }
}

fn parse_date_string(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less datetimes are taken as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    // Bare dates mean midnight UTC.
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    // Stringified epoch milliseconds.
    if let Ok(ms) = s.parse::<i64>() {
        return from_epoch_millis(ms);
    }

    None
}

fn from_epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = event_timestamp(&Bson::String("2030-05-01T18:00:00+02:00".into())).unwrap();
        assert_eq!(ts.to_rfc3339(), "2030-05-01T16:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339_zulu_with_millis() {
        let ts = event_timestamp(&Bson::String("2030-05-01T18:00:00.250Z".into())).unwrap();
        assert_eq!(ts.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn offsetless_datetime_is_utc() {
        let ts = event_timestamp(&Bson::String("2030-05-01T18:00:00".into())).unwrap();
        assert_eq!(ts.to_rfc3339(), "2030-05-01T18:00:00+00:00");
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let ts = event_timestamp(&Bson::String("2030-05-01".into())).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2030, 5, 1));
        assert_eq!(ts.timestamp() % 86_400, 0);
    }

    #[test]
    fn numeric_values_are_epoch_millis() {
        let expected = Utc.timestamp_millis_opt(1_900_000_000_000).unwrap();
        assert_eq!(event_timestamp(&Bson::Int64(1_900_000_000_000)), Some(expected));
        assert_eq!(
            event_timestamp(&Bson::String("1900000000000".into())),
            Some(expected)
        );
        assert_eq!(
            event_timestamp(&Bson::Double(1_900_000_000_000.0)),
            Some(expected)
        );
    }

    #[test]
    fn bson_datetime_converts_directly() {
        let now = Utc::now();
        let ts = event_timestamp(&Bson::DateTime(bson::DateTime::from_chrono(now))).unwrap();
        assert_eq!(ts.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn garbage_is_none() {
        for junk in ["", "   ", "next Tuesday-ish", "2030-13-45"] {
            assert_eq!(event_timestamp(&Bson::String(junk.into())), None, "{junk:?}");
        }
        assert_eq!(event_timestamp(&Bson::Null), None);
        assert_eq!(event_timestamp(&Bson::Double(f64::NAN)), None);
        assert_eq!(event_timestamp(&Bson::Boolean(true)), None);
    }
}

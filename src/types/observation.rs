//! The typed observation record and its construction from the raw
//! string-keyed payload records the observation service returns.

use crate::types::coordinates::LatLon;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw payload record: field name to string value, exactly as decoded
/// from the service response.
pub type RawRecord = HashMap<String, String>;

/// One weather reading from a station at an instant.
///
/// Built from a [`RawRecord`] with [`Observation::from_raw`]. Station name
/// and coordinates are required; every meteorological field is independently
/// optional because stations report different instrument sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// The station id this record was grouped under in the response. Carried
    /// from the grouping key, never from the payload itself.
    pub location_id: String,
    pub station_name: String,
    /// Observation time. Falls back to the parse-time "now" when the payload
    /// carries no `time` value or one that does not parse; a malformed
    /// server timestamp therefore looks like a fresh reading.
    pub time: DateTime<Utc>,
    pub coordinates: LatLon,
    pub wind_speed: Option<f64>,
    pub wind_speed_gust: Option<f64>,
    pub wind_direction: Option<f64>,
    pub air_temperature: Option<f64>,
    pub amount_of_cloud: Option<f64>,
    pub visibility: Option<f64>,
    pub precipitation_amount: Option<f64>,
    pub relative_humidity: Option<f64>,
}

/// An observation older than this counts as expired.
const EXPIRY_MINUTES: i64 = 10;

impl Observation {
    /// Validates one raw record into a typed observation.
    ///
    /// Returns `None` when `stationName`, `lat` or `long` is missing, or when
    /// either coordinate is non-numeric; such a record contributes nothing to
    /// the station's history. Optional fields parse best-effort: an absent or
    /// non-numeric value becomes `None`, never a failure.
    pub fn from_raw(location_id: &str, raw: &RawRecord) -> Option<Observation> {
        let station_name = raw.get("stationName")?.clone();
        let lat = raw.get("lat")?.parse::<f64>().ok()?;
        let lon = raw.get("long")?.parse::<f64>().ok()?;

        Some(Observation {
            location_id: location_id.to_string(),
            station_name,
            time: parse_time(raw.get("time")),
            coordinates: LatLon(lat, lon),
            wind_speed: numeric_field(raw, "windSpeed"),
            wind_speed_gust: numeric_field(raw, "windSpeedGust"),
            wind_direction: numeric_field(raw, "windDirection"),
            air_temperature: numeric_field(raw, "airTemperature"),
            amount_of_cloud: numeric_field(raw, "amountOfCloud"),
            visibility: numeric_field(raw, "visibility"),
            precipitation_amount: numeric_field(raw, "precipitationAmount"),
            relative_humidity: numeric_field(raw, "relativeHumidity"),
        })
    }

    /// True when the reading is more than ten minutes old.
    pub fn is_expired(&self) -> bool {
        Utc::now() - self.time > Duration::minutes(EXPIRY_MINUTES)
    }
}

fn numeric_field(raw: &RawRecord, key: &str) -> Option<f64> {
    raw.get(key).and_then(|v| v.parse::<f64>().ok())
}

/// Seconds-since-epoch string to a UTC instant; anything else becomes "now".
fn parse_time(value: Option<&String>) -> DateTime<Utc> {
    value
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> RawRecord {
        RawRecord::from([
            ("stationName".to_string(), "Harmaja".to_string()),
            ("lat".to_string(), "60.105".to_string()),
            ("long".to_string(), "24.975".to_string()),
            ("time".to_string(), "1700000000".to_string()),
            ("windSpeed".to_string(), "5.0".to_string()),
        ])
    }

    #[test]
    fn parses_a_complete_record() {
        let obs = Observation::from_raw("s1", &valid_record()).unwrap();
        assert_eq!(obs.location_id, "s1");
        assert_eq!(obs.station_name, "Harmaja");
        assert_eq!(obs.coordinates, LatLon(60.105, 24.975));
        assert_eq!(obs.time, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        assert_eq!(obs.wind_speed, Some(5.0));
        assert_eq!(obs.air_temperature, None);
    }

    #[test]
    fn missing_required_field_discards_the_record() {
        for key in ["stationName", "lat", "long"] {
            let mut raw = valid_record();
            raw.remove(key);
            assert!(
                Observation::from_raw("s1", &raw).is_none(),
                "record without {key} should be discarded"
            );
        }
    }

    #[test]
    fn non_numeric_coordinate_discards_the_record() {
        let mut raw = valid_record();
        raw.insert("lat".to_string(), "sixty".to_string());
        assert!(Observation::from_raw("s1", &raw).is_none());
    }

    #[test]
    fn unparseable_optional_field_becomes_none() {
        let mut raw = valid_record();
        raw.insert("windSpeed".to_string(), "NaN-ish".to_string());
        let obs = Observation::from_raw("s1", &raw).unwrap();
        assert_eq!(obs.wind_speed, None);
    }

    #[test]
    fn missing_time_defaults_to_now() {
        let mut raw = valid_record();
        raw.remove("time");
        let obs = Observation::from_raw("s1", &raw).unwrap();
        assert!((Utc::now() - obs.time).num_seconds().abs() < 5);
    }

    #[test]
    fn unparseable_time_defaults_to_now() {
        let mut raw = valid_record();
        raw.insert("time".to_string(), "not-a-number".to_string());
        let obs = Observation::from_raw("s1", &raw).unwrap();
        assert!((Utc::now() - obs.time).num_seconds().abs() < 5);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let obs = Observation::from_raw("s1", &valid_record()).unwrap();
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["locationId"], "s1");
        assert_eq!(json["stationName"], "Harmaja");
        assert_eq!(json["windSpeed"], 5.0);
        assert!(json["airTemperature"].is_null());

        let back: Observation = serde_json::from_value(json).unwrap();
        assert_eq!(back, obs);
    }

    #[test]
    fn old_reading_is_expired() {
        let mut obs = Observation::from_raw("s1", &valid_record()).unwrap();
        obs.time = Utc::now() - Duration::minutes(11);
        assert!(obs.is_expired());
        obs.time = Utc::now() - Duration::minutes(9);
        assert!(!obs.is_expired());
    }
}

//! Builds the per-station observation table from a decoded response:
//! validate every raw record, keep each station's survivors in
//! chronological order, and drop stations that end up empty.

use crate::types::observation::{Observation, RawRecord};
use std::collections::HashMap;

/// The decoded response shape: station id to its list of raw records.
pub type RawResponse = HashMap<String, Vec<RawRecord>>;

/// Station id to that station's observation history, ascending by time.
///
/// Invariant: no station maps to an empty history; a station whose every raw
/// record failed validation is absent from the table.
pub type StationTable = HashMap<String, Vec<Observation>>;

/// Converts a decoded response into a [`StationTable`].
///
/// Records that fail validation are dropped individually. The per-station
/// sort is stable, so observations sharing a timestamp keep their payload
/// order; duplicates are retained, not merged.
pub fn build_station_table(raw: RawResponse) -> StationTable {
    let mut table = StationTable::with_capacity(raw.len());
    for (location_id, records) in raw {
        let mut history: Vec<Observation> = records
            .iter()
            .filter_map(|record| Observation::from_raw(&location_id, record))
            .collect();
        if history.is_empty() {
            continue;
        }
        history.sort_by_key(|obs| obs.time);
        table.insert(location_id, history);
    }
    table
}

/// The newest observation for a station, if the table knows the station.
pub fn latest<'a>(table: &'a StationTable, location_id: &str) -> Option<&'a Observation> {
    table.get(location_id).and_then(|history| history.last())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(time: &str) -> RawRecord {
        RawRecord::from([
            ("stationName".to_string(), "Harmaja".to_string()),
            ("lat".to_string(), "60.105".to_string()),
            ("long".to_string(), "24.975".to_string()),
            ("time".to_string(), time.to_string()),
        ])
    }

    fn record_with_wind(time: &str, wind_speed: &str) -> RawRecord {
        let mut r = record(time);
        r.insert("windSpeed".to_string(), wind_speed.to_string());
        r
    }

    #[test]
    fn station_with_only_invalid_records_is_omitted() {
        let mut bad = record("100");
        bad.insert("lat".to_string(), "not-a-coordinate".to_string());
        let raw = RawResponse::from([
            ("s1".to_string(), vec![bad]),
            ("s2".to_string(), vec![record("100")]),
        ]);

        let table = build_station_table(raw);
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("s2"));
    }

    #[test]
    fn invalid_records_are_dropped_individually() {
        let mut bad = record("100");
        bad.remove("stationName");
        let raw = RawResponse::from([("s1".to_string(), vec![bad, record("200")])]);

        let table = build_station_table(raw);
        assert_eq!(table["s1"].len(), 1);
    }

    #[test]
    fn history_is_sorted_ascending_by_time() {
        let raw = RawResponse::from([(
            "s1".to_string(),
            vec![record("300"), record("100"), record("200")],
        )]);

        let table = build_station_table(raw);
        let times: Vec<i64> = table["s1"].iter().map(|o| o.time.timestamp()).collect();
        assert_eq!(times, [100, 200, 300]);
    }

    #[test]
    fn equal_timestamps_keep_payload_order() {
        let raw = RawResponse::from([(
            "s1".to_string(),
            vec![
                record_with_wind("100", "1.0"),
                record_with_wind("100", "2.0"),
                record_with_wind("50", "0.5"),
                record_with_wind("100", "3.0"),
            ],
        )]);

        let table = build_station_table(raw);
        let winds: Vec<f64> = table["s1"].iter().filter_map(|o| o.wind_speed).collect();
        assert_eq!(winds, [0.5, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn latest_picks_the_newest_observation() {
        let raw = RawResponse::from([(
            "s1".to_string(),
            vec![record("300"), record("100"), record("200")],
        )]);
        let table = build_station_table(raw);

        let newest = latest(&table, "s1").unwrap();
        assert_eq!(newest.time, Utc.timestamp_opt(300, 0).unwrap());
        assert!(latest(&table, "unknown").is_none());
    }
}

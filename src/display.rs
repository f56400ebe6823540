//! Pure formatting helpers for presenting observations: sexagesimal
//! coordinates, compass sectors for wind directions, wind-barb step
//! selection and the one-line summary a map callout shows.
//!
//! No UI types here; everything returns plain strings or numbers.

use crate::types::coordinates::LatLon;
use crate::types::observation::Observation;

const COMPASS_SECTORS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Wind barbs step every 2.5 m/s; 12 is the strongest barb available.
const BARB_STEP_MS: f64 = 2.5;
const MAX_BARB_STEP: u8 = 12;

/// Formats one decimal-degree coordinate as hemisphere, whole degrees and
/// the fractional part, e.g. `N 60° 0.203'`.
pub fn sexagesimal(decimal_degree: f64, is_latitude: bool) -> String {
    let degrees = decimal_degree.trunc() as i64;
    let fraction = decimal_degree - decimal_degree.trunc();
    let hemisphere = if is_latitude {
        if decimal_degree >= 0.0 {
            "N"
        } else {
            "S"
        }
    } else if decimal_degree >= 0.0 {
        "E"
    } else {
        "W"
    };
    format!("{} {}° {:.3}'", hemisphere, degrees.abs(), fraction.abs())
}

/// Both coordinates of a point, latitude first.
pub fn coordinate_string(point: LatLon) -> String {
    format!(
        "{} {}",
        sexagesimal(point.0, true),
        sexagesimal(point.1, false)
    )
}

/// The 45°-wide compass sector a wind direction falls in.
pub fn compass_sector(wind_direction: f64) -> &'static str {
    let sector = ((wind_direction / 45.0).round() as i64).rem_euclid(8) as usize;
    COMPASS_SECTORS[sector]
}

/// `"NE (45°)"`, or an empty string when the direction is unknown.
pub fn wind_direction_text(wind_direction: Option<f64>) -> String {
    match wind_direction {
        Some(direction) => {
            let rounded = direction.round();
            format!("{} ({:.0}°)", compass_sector(rounded), rounded)
        }
        None => String::new(),
    }
}

/// Which wind barb to draw for a wind speed, 0 to 12.
///
/// Negative speeds select the empty barb 0; a calm but valid reading gets
/// the first barb, 1, which calm and near-calm speeds share.
pub fn wind_barb_step(wind_speed: f64) -> u8 {
    let step = (wind_speed / BARB_STEP_MS).round();
    if step < 0.0 {
        0
    } else if step >= MAX_BARB_STEP as f64 {
        MAX_BARB_STEP
    } else {
        (step as u8).max(1)
    }
}

/// The one-line temperature-and-wind summary for an observation, e.g.
/// `"4.5°C NE (45°) 5 m/s (8 m/s)"`. Falls back to a placeholder when no
/// temperature or wind data exists.
pub fn summary_line(observation: &Observation) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(temperature) = observation.air_temperature {
        parts.push(format!("{}°C", temperature));
    }
    let direction = wind_direction_text(observation.wind_direction);
    if !direction.is_empty() {
        parts.push(direction);
    }
    if let Some(speed) = observation.wind_speed {
        parts.push(format!("{} m/s", speed));
    }
    if let Some(gust) = observation.wind_speed_gust {
        parts.push(format!("({} m/s)", gust));
    }
    if parts.is_empty() {
        "(No temperature & wind data)".to_string()
    } else {
        parts.join(" ")
    }
}

use crate::models::{NormalizedReading, Reading};
use crate::utils::constants::{CELSIUS_PER_FAHRENHEIT, FREEZING_POINT_F};
use tracing::debug;

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - FREEZING_POINT_F) * CELSIUS_PER_FAHRENHEIT
}

/// Daily temperature in °C.
///
/// A reported TAVG wins, including 0°F. Otherwise the TMIN/TMAX midpoint is
/// used, and a missing bound yields NaN.
pub fn daily_temperature(reading: &Reading) -> f64 {
    match (reading.tavg, reading.tmin, reading.tmax) {
        (Some(avg), _, _) => fahrenheit_to_celsius(avg),
        (None, Some(min), Some(max)) => fahrenheit_to_celsius((max + min) / 2.0),
        _ => f64::NAN,
    }
}

pub fn normalize(reading: Reading) -> NormalizedReading {
    let temperature = daily_temperature(&reading);
    NormalizedReading {
        reading,
        temperature,
    }
}

pub fn normalize_all(readings: Vec<Reading>) -> Vec<NormalizedReading> {
    let normalized: Vec<NormalizedReading> = readings.into_iter().map(normalize).collect();

    let unusable = normalized.iter().filter(|r| !r.is_usable()).count();
    if unusable > 0 {
        debug!(
            "{} of {} readings have no usable temperature",
            unusable,
            normalized.len()
        );
    }

    normalized
}

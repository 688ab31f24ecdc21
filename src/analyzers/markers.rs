use crate::analyzers::color_scale::{Rgb, TemperatureColorScale};
use crate::models::StationSummary;
use crate::utils::constants::{MARKER_BASE_RADIUS, MARKER_MAX_RADIUS, MARKER_READINGS_PER_PIXEL};
use crate::utils::projection::AlbersUsa;
use serde::Serialize;

/// Circle radius in pixels; grows with the number of readings, capped at 8.
pub fn marker_radius(reading_count: usize) -> f64 {
    (MARKER_BASE_RADIUS + reading_count as f64 / MARKER_READINGS_PER_PIXEL).min(MARKER_MAX_RADIUS)
}

fn format_average(avg: f64) -> String {
    if avg.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.1}°C", avg)
    }
}

pub fn popup_text(station: &StationSummary) -> String {
    format!(
        "{}, {}\nAvg. Temperature: {}\nElevation: {}m\nData points: {}",
        station.station,
        station.state,
        format_average(station.avg_temperature),
        station.elevation,
        station.reading_count
    )
}

pub fn details_text(station: &StationSummary) -> String {
    format!(
        "{}, {}\nAverage Temperature: {}\nLatitude: {:.4}, Longitude: {:.4}\nElevation: {}m\nNumber of readings: {}",
        station.station,
        station.state,
        format_average(station.avg_temperature),
        station.latitude,
        station.longitude,
        station.elevation,
        station.reading_count
    )
}

/// Everything needed to draw one station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub station: StationSummary,
    pub radius: f64,
    /// Hex color; `None` when the station has no real average
    pub color: Option<String>,
    /// Albers USA pixel position, if the station projects
    pub map_position: Option<(f64, f64)>,
}

impl StationMarker {
    pub fn new(station: &StationSummary, scale: Option<&TemperatureColorScale>, projection: &AlbersUsa) -> Self {
        let color: Option<Rgb> = scale.and_then(|s| s.color(station.avg_temperature));
        Self {
            station: station.clone(),
            radius: marker_radius(station.reading_count),
            color: color.map(|c| c.to_hex()),
            map_position: projection.project(station.longitude, station.latitude),
        }
    }
}

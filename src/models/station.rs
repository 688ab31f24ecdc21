use serde::{Deserialize, Serialize};

/// Per-station aggregate rendered as one map marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station: String,

    pub state: String,

    /// NaN when the source left it blank
    pub latitude: f64,
    pub longitude: f64,

    pub elevation: f64,

    /// Mean °C over every reading of the station; NaN if any reading lacked a temperature
    pub avg_temperature: f64,

    pub reading_count: usize,
}

impl StationSummary {
    pub fn new(
        station: String,
        state: String,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        avg_temperature: f64,
        reading_count: usize,
    ) -> Self {
        Self {
            station,
            state,
            latitude,
            longitude,
            elevation,
            avg_temperature,
            reading_count,
        }
    }

    /// False when any reading of the station lacked a temperature.
    pub fn has_average(&self) -> bool {
        !self.avg_temperature.is_nan()
    }
}

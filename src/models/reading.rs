use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// One day of observations from one station, as exported in the CSV.
///
/// Measurements are `None` when the source cell was empty. Station metadata
/// (`latitude`, `longitude`, `elevation`) is NaN when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub station: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub date: NaiveDate,

    // Temperatures in °F
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,

    // Wind speed (mph), snowfall, snow depth, precipitation (in)
    #[serde(rename = "AWND")]
    pub awnd: Option<f64>,
    #[serde(rename = "SNOW")]
    pub snow: Option<f64>,
    #[serde(rename = "SNWD")]
    pub snwd: Option<f64>,
    #[serde(rename = "PRCP")]
    pub prcp: Option<f64>,
}

impl Reading {
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::new()
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A [`Reading`] with its temperature converted to °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReading {
    #[serde(flatten)]
    pub reading: Reading,

    /// NaN when neither TAVG nor both TMIN and TMAX were reported
    pub temperature: f64,
}

impl NormalizedReading {
    pub fn station(&self) -> &str {
        &self.reading.station
    }

    pub fn state(&self) -> &str {
        &self.reading.state
    }

    pub fn date(&self) -> NaiveDate {
        self.reading.date
    }

    /// Whether this reading can contribute a real value to an average.
    pub fn is_usable(&self) -> bool {
        !self.temperature.is_nan()
    }

    pub fn tmin_celsius(&self) -> f64 {
        self.reading
            .tmin
            .map_or(f64::NAN, crate::processors::normalizer::fahrenheit_to_celsius)
    }

    pub fn tmax_celsius(&self) -> f64 {
        self.reading
            .tmax
            .map_or(f64::NAN, crate::processors::normalizer::fahrenheit_to_celsius)
    }
}

pub struct ReadingBuilder {
    station: Option<String>,
    state: Option<String>,
    date: Option<NaiveDate>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    elevation: Option<f64>,
    tmin: Option<f64>,
    tmax: Option<f64>,
    tavg: Option<f64>,
    awnd: Option<f64>,
    snow: Option<f64>,
    snwd: Option<f64>,
    prcp: Option<f64>,
}

impl Default for ReadingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingBuilder {
    pub fn new() -> Self {
        Self {
            station: None,
            state: None,
            date: None,
            latitude: None,
            longitude: None,
            elevation: None,
            tmin: None,
            tmax: None,
            tavg: None,
            awnd: None,
            snow: None,
            snwd: None,
            prcp: None,
        }
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn tmin(mut self, temp: f64) -> Self {
        self.tmin = Some(temp);
        self
    }

    pub fn tmax(mut self, temp: f64) -> Self {
        self.tmax = Some(temp);
        self
    }

    pub fn tavg(mut self, temp: f64) -> Self {
        self.tavg = Some(temp);
        self
    }

    pub fn temperatures(mut self, min: f64, max: f64) -> Self {
        self.tmin = Some(min);
        self.tmax = Some(max);
        self
    }

    pub fn wind_speed(mut self, speed: f64) -> Self {
        self.awnd = Some(speed);
        self
    }

    pub fn snowfall(mut self, snow: f64) -> Self {
        self.snow = Some(snow);
        self
    }

    pub fn snow_depth(mut self, depth: f64) -> Self {
        self.snwd = Some(depth);
        self
    }

    pub fn precipitation(mut self, precip: f64) -> Self {
        self.prcp = Some(precip);
        self
    }

    pub fn build(self) -> Result<Reading> {
        Ok(Reading {
            station: self
                .station
                .ok_or_else(|| ProcessingError::MissingData("station".to_string()))?,
            state: self
                .state
                .ok_or_else(|| ProcessingError::MissingData("state".to_string()))?,
            date: self
                .date
                .ok_or_else(|| ProcessingError::MissingData("date".to_string()))?,
            latitude: self.latitude.unwrap_or(f64::NAN),
            longitude: self.longitude.unwrap_or(f64::NAN),
            elevation: self.elevation.unwrap_or(f64::NAN),
            tmin: self.tmin,
            tmax: self.tmax,
            tavg: self.tavg,
            awnd: self.awnd,
            snow: self.snow,
            snwd: self.snwd,
            prcp: self.prcp,
        })
    }
}

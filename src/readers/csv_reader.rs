use crate::error::{ProcessingError, Result};
use crate::models::Reading;
use crate::utils::constants::*;
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, info};

/// Reads the daily station CSV export into [`Reading`]s.
///
/// Every row is kept. Empty measurement cells become `None`; a malformed
/// `date` aborts the whole load.
#[derive(Debug, Clone, Copy)]
pub struct WeatherCsvReader;

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    station: usize,
    state: usize,
    latitude: usize,
    longitude: usize,
    elevation: usize,
    date: usize,
    tmin: usize,
    tmax: usize,
    tavg: usize,
    awnd: usize,
    snow: usize,
    snwd: usize,
    prcp: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))?;
        }

        let [station, state, latitude, longitude, elevation, date, tmin, tmax, tavg, awnd, snow, snwd, prcp] =
            positions;

        Ok(Self {
            station,
            state,
            latitude,
            longitude,
            elevation,
            date,
            tmin,
            tmax,
            tavg,
            awnd,
            snow,
            snwd,
            prcp,
        })
    }
}

impl WeatherCsvReader {
    pub fn new() -> Self {
        Self
    }

    /// Load the whole file in one awaited read, then parse it.
    pub async fn load_readings(&self, path: &Path) -> Result<Vec<Reading>> {
        let bytes = tokio::fs::read(path).await?;
        let text = decode_input(&bytes)?;
        let reader = *self;

        let readings = tokio::task::spawn_blocking(move || reader.parse_str(&text)).await??;

        info!("Loaded {} readings from {}", readings.len(), path.display());
        Ok(readings)
    }

    pub fn parse_str(&self, text: &str) -> Result<Vec<Reading>> {
        self.read_from(text.as_bytes())
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<Reading>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut readings = Vec::new();
        for record_result in reader.records() {
            let record = record_result?;
            let line = record.position().map_or(0, |p| p.line());
            readings.push(self.parse_record(&record, &columns, line)?);
        }

        debug!("Parsed {} rows", readings.len());
        Ok(readings)
    }

    fn parse_record(&self, record: &StringRecord, columns: &ColumnIndex, line: u64) -> Result<Reading> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_compact_date(field(columns.date)).inspect_err(|e| {
            error!("Line {}: {}", line, e);
        })?;

        Ok(Reading {
            station: field(columns.station).to_string(),
            state: field(columns.state).to_string(),
            latitude: parse_metadata(field(columns.latitude)),
            longitude: parse_metadata(field(columns.longitude)),
            elevation: parse_metadata(field(columns.elevation)),
            date,
            tmin: parse_measurement(field(columns.tmin), COL_TMIN, line),
            tmax: parse_measurement(field(columns.tmax), COL_TMAX, line),
            tavg: parse_measurement(field(columns.tavg), COL_TAVG, line),
            awnd: parse_measurement(field(columns.awnd), COL_AWND, line),
            snow: parse_measurement(field(columns.snow), COL_SNOW, line),
            snwd: parse_measurement(field(columns.snwd), COL_SNWD, line),
            prcp: parse_measurement(field(columns.prcp), COL_PRCP, line),
        })
    }
}

impl Default for WeatherCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an 8-digit `YYYYMMDD` date.
///
/// # Examples
/// ```
/// use station_weather::readers::parse_compact_date;
///
/// let date = parse_compact_date("20230115").unwrap();
/// assert_eq!(date.to_string(), "2023-01-15");
/// assert!(parse_compact_date("2023011").is_err());
/// ```
pub fn parse_compact_date(value: &str) -> Result<NaiveDate> {
    let invalid = |reason: &str| ProcessingError::InvalidDate {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.len() != COMPACT_DATE_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected exactly 8 digits (YYYYMMDD)"));
    }

    // All ASCII digits, so the slices below cannot fail to parse
    let year: i32 = value[0..4].parse().map_err(|_| invalid("bad year"))?;
    let month: u32 = value[4..6].parse().map_err(|_| invalid("bad month"))?;
    let day: u32 = value[6..8].parse().map_err(|_| invalid("bad day"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar date"))
}

/// Empty means missing. Unparseable or non-finite text is also treated as missing.
fn parse_measurement(value: &str, column: &str, line: u64) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => {
            debug!("Line {}: {} value '{}' is not finite, treating as missing", line, column, value);
            None
        }
        Err(_) => {
            debug!("Line {}: {} value '{}' is not numeric, treating as missing", line, column, value);
            None
        }
    }
}

fn parse_metadata(value: &str) -> f64 {
    value.parse::<f64>().unwrap_or(f64::NAN)
}

/// Decode raw file bytes as UTF-8, honouring a byte-order mark.
pub fn decode_input(bytes: &[u8]) -> Result<String> {
    let (text, _encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        return Err(ProcessingError::Encoding(
            "input is not valid UTF-8".to_string(),
        ));
    }
    Ok(text.into_owned())
}

use crate::models::NormalizedReading;
use crate::utils::constants::SERIES_DOMAIN_PADDING;
use chrono::NaiveDate;
use serde::Serialize;

/// One station's readings in ascending date order, for the line chart.
#[derive(Debug, Clone, Serialize)]
pub struct StationSeries {
    pub station: String,
    pub points: Vec<NormalizedReading>,
}

/// Axis domains for a [`StationSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesDomain {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub temp_low: f64,
    pub temp_high: f64,
}

/// Readings of `station`, sorted by date. Ties keep input order.
pub fn station_series(readings: &[NormalizedReading], station: &str) -> StationSeries {
    let mut points: Vec<NormalizedReading> = readings
        .iter()
        .filter(|r| r.station() == station)
        .cloned()
        .collect();
    points.sort_by_key(|r| r.date());

    StationSeries {
        station: station.to_string(),
        points,
    }
}

impl StationSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Date extent and temperature extent padded by 2°C each side.
    /// `None` for an empty series or one without any real temperature.
    pub fn domain(&self) -> Option<SeriesDomain> {
        let first_date = self.points.first()?.date();
        let last_date = self.points.last()?.date();

        let (low, high) = self
            .points
            .iter()
            .map(|r| r.temperature)
            .filter(|t| !t.is_nan())
            .fold(None, |acc: Option<(f64, f64)>, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })?;

        Some(SeriesDomain {
            first_date,
            last_date,
            temp_low: low - SERIES_DOMAIN_PADDING,
            temp_high: high + SERIES_DOMAIN_PADDING,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reading;
    use crate::processors::normalize;

    fn reading(station: &str, ymd: (i32, u32, u32), tavg: Option<f64>) -> NormalizedReading {
        let mut builder = Reading::builder()
            .station(station)
            .state("CO")
            .date(NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap());
        if let Some(t) = tavg {
            builder = builder.tavg(t);
        }
        normalize(builder.build().unwrap())
    }

    #[test]
    fn test_series_sorted_by_date() {
        let readings = vec![
            reading("A", (2023, 1, 3), Some(41.0)),
            reading("B", (2023, 1, 1), Some(30.0)),
            reading("A", (2023, 1, 1), Some(32.0)),
            reading("A", (2023, 1, 2), Some(50.0)),
        ];

        let series = station_series(&readings, "A");
        let dates: Vec<u32> = series.points.iter().map(|r| chrono::Datelike::day(&r.date())).collect();

        assert_eq!(series.len(), 3);
        assert_eq!(dates, vec![1, 2, 3]);
    }

    #[test]
    fn test_series_domain_padding() {
        let readings = vec![
            reading("A", (2023, 1, 2), Some(50.0)), // 10°C
            reading("A", (2023, 1, 1), Some(32.0)), // 0°C
            reading("A", (2023, 1, 3), None),
        ];

        let domain = station_series(&readings, "A").domain().unwrap();

        assert_eq!(domain.first_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(domain.last_date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert!((domain.temp_low - -2.0).abs() < 1e-9);
        assert!((domain.temp_high - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_station_is_empty() {
        let readings = vec![reading("A", (2023, 1, 1), Some(32.0))];
        let series = station_series(&readings, "Z");

        assert!(series.is_empty());
        assert!(series.domain().is_none());
    }
}

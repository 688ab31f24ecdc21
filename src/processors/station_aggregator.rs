use crate::models::{NormalizedReading, StationSummary};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Readings of one station, in input order.
#[derive(Debug, Clone)]
pub struct StationGroup<'a> {
    pub station: &'a str,
    pub readings: Vec<&'a NormalizedReading>,
}

pub struct StationAggregator {
    check_metadata: bool,
}

impl StationAggregator {
    pub fn new() -> Self {
        Self {
            check_metadata: true,
        }
    }

    pub fn with_metadata_check(check_metadata: bool) -> Self {
        Self { check_metadata }
    }

    /// Reduce readings to one summary per station, in first-seen station order.
    pub fn aggregate(&self, readings: &[NormalizedReading]) -> Vec<StationSummary> {
        let summaries: Vec<StationSummary> = self
            .group_by_station(readings)
            .iter()
            .map(|group| self.summarize(group))
            .collect();

        debug!(
            "Aggregated {} readings into {} stations",
            readings.len(),
            summaries.len()
        );
        summaries
    }

    /// Group readings by station id, preserving first-seen order.
    pub fn group_by_station<'a>(&self, readings: &'a [NormalizedReading]) -> Vec<StationGroup<'a>> {
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut groups: Vec<StationGroup<'a>> = Vec::new();

        for reading in readings {
            let station = reading.station();
            let idx = *positions.entry(station).or_insert_with(|| {
                groups.push(StationGroup {
                    station,
                    readings: Vec::new(),
                });
                groups.len() - 1
            });
            groups[idx].readings.push(reading);
        }

        groups
    }

    fn summarize(&self, group: &StationGroup<'_>) -> StationSummary {
        // Groups are built from existing readings, never empty
        let first = &group.readings[0].reading;

        if self.check_metadata {
            let inconsistent = group.readings[1..]
                .iter()
                .any(|r| !same_metadata(first, &r.reading));
            if inconsistent {
                warn!(
                    "Station {} has inconsistent metadata across readings; using the first reading's",
                    group.station
                );
            }
        }

        let sum: f64 = group.readings.iter().map(|r| r.temperature).sum();
        let count = group.readings.len();

        StationSummary::new(
            group.station.to_string(),
            first.state.clone(),
            first.latitude,
            first.longitude,
            first.elevation,
            sum / count as f64,
            count,
        )
    }
}

impl Default for StationAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn same_metadata(a: &crate::models::Reading, b: &crate::models::Reading) -> bool {
    fn same(x: f64, y: f64) -> bool {
        x == y || (x.is_nan() && y.is_nan())
    }

    a.state == b.state
        && same(a.latitude, b.latitude)
        && same(a.longitude, b.longitude)
        && same(a.elevation, b.elevation)
}

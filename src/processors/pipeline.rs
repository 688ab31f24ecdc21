use crate::error::Result;
use crate::models::{NormalizedReading, Reading, StationSummary};
use crate::processors::normalizer::normalize_all;
use crate::processors::StationAggregator;
use crate::readers::WeatherCsvReader;
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::info;

/// Everything the dashboard derives from one input file.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub readings: Vec<NormalizedReading>,
    pub stations: Vec<StationSummary>,
}

/// Ingestion, normalization and aggregation in one pass.
pub struct Pipeline {
    reader: WeatherCsvReader,
    aggregator: StationAggregator,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            reader: WeatherCsvReader::new(),
            aggregator: StationAggregator::new(),
        }
    }

    pub fn with_aggregator(mut self, aggregator: StationAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Load `path` and derive all data. Any load failure aborts; nothing partial is returned.
    pub async fn load(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<DashboardData> {
        if let Some(p) = progress {
            p.set_message("Reading weather data...");
        }

        let readings = self.reader.load_readings(path).await?;

        if let Some(p) = progress {
            p.set_message("Aggregating stations...");
        }

        let data = self.from_readings(readings);

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Loaded {} readings from {} stations",
                data.readings.len(),
                data.stations.len()
            ));
        }

        Ok(data)
    }

    pub fn from_readings(&self, readings: Vec<Reading>) -> DashboardData {
        let readings = normalize_all(readings);
        let stations = self.aggregator.aggregate(&readings);

        info!(
            "Prepared {} stations from {} readings",
            stations.len(),
            readings.len()
        );

        DashboardData { readings, stations }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

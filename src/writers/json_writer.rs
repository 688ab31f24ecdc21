use crate::analyzers::{Dashboard, LegendEntry, StationMarker, StationView};
use crate::error::Result;
use crate::processors::{available_states, FilterState};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Snapshot handed to the rendering layer. NaN averages serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardExport {
    pub source: String,
    pub filter: FilterState,
    pub states: Vec<String>,
    /// `(hottest, coldest)`; `None` if no station has a real average
    pub color_domain: Option<(f64, f64)>,
    pub legend: Vec<LegendEntry>,
    pub markers: Vec<StationMarker>,
    /// Details panel, if a station is selected and still visible
    pub selected: Option<StationView>,
}

impl DashboardExport {
    pub fn from_dashboard(dashboard: &Dashboard, source: &str, legend_bins: usize) -> Self {
        Self {
            source: source.to_string(),
            filter: dashboard.filter().clone(),
            states: available_states(dashboard.stations()),
            color_domain: dashboard.color_scale().map(|s| s.domain()),
            legend: dashboard.legend(legend_bins),
            markers: dashboard.visible_markers(),
            selected: dashboard
                .selected_station()
                .and_then(|s| dashboard.station_view(&s.station).ok()),
        }
    }
}

pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Write `value` to `path`, returning the number of bytes written.
    pub fn write<T: Serialize>(&self, value: &T, path: &Path) -> Result<u64> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = self.to_json(value)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        info!("Wrote {} bytes to {}", json.len(), path.display());
        Ok(json.len() as u64)
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

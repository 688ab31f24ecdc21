use crate::analyzers::color_scale::{LegendEntry, TemperatureColorScale};
use crate::analyzers::markers::{details_text, StationMarker};
use crate::analyzers::time_series::{station_series, StationSeries};
use crate::error::{ProcessingError, Result};
use crate::models::{NormalizedReading, StationSummary};
use crate::processors::{filter_stations, DashboardData, FilterOutcome, FilterState, SelectionEvent};
use crate::utils::projection::AlbersUsa;
use serde::Serialize;
use tracing::{debug, info};

/// Detail panel and chart data for the clicked station.
#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub summary: StationSummary,
    pub details: String,
    pub series: StationSeries,
    /// Line color, the station's marker color
    pub line_color: Option<String>,
}

/// The map view's state: loaded data, the fixed color scale, the current
/// state filter and the selected station.
pub struct Dashboard {
    data: DashboardData,
    color_scale: Option<TemperatureColorScale>,
    projection: AlbersUsa,
    filter: FilterState,
    selected: Option<String>,
}

impl Dashboard {
    pub fn new(data: DashboardData) -> Self {
        let color_scale = TemperatureColorScale::from_stations(&data.stations);
        if let Some(scale) = &color_scale {
            let (hot, cold) = scale.domain();
            debug!("Color domain fixed at [{:.2}, {:.2}]", hot, cold);
        }

        Self {
            data,
            color_scale,
            projection: AlbersUsa::new(),
            filter: FilterState::all(),
            selected: None,
        }
    }

    pub fn stations(&self) -> &[StationSummary] {
        &self.data.stations
    }

    pub fn readings(&self) -> &[NormalizedReading] {
        &self.data.readings
    }

    pub fn color_scale(&self) -> Option<&TemperatureColorScale> {
        self.color_scale.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn legend(&self, bins: usize) -> Vec<LegendEntry> {
        self.color_scale
            .map(|scale| scale.legend(bins))
            .unwrap_or_default()
    }

    /// Apply a new state selection. A selected station that becomes hidden is deselected.
    pub fn apply_selection(&mut self, event: &SelectionEvent) -> FilterOutcome {
        let outcome = filter_stations(event, &self.data.stations);
        self.filter = outcome.state.clone();

        if let Some(selected) = &self.selected {
            if !outcome.visible.iter().any(|s| &s.station == selected) {
                info!("Selected station {} hidden by filter, clearing details", selected);
                self.selected = None;
            }
        }

        outcome
    }

    pub fn visible_markers(&self) -> Vec<StationMarker> {
        self.filter
            .visible(&self.data.stations)
            .map(|s| StationMarker::new(s, self.color_scale.as_ref(), &self.projection))
            .collect()
    }

    pub fn select_station(&mut self, station: &str) -> Result<StationView> {
        let view = self.station_view(station)?;
        self.selected = Some(station.to_string());
        Ok(view)
    }

    pub fn selected_station(&self) -> Option<&StationSummary> {
        let selected = self.selected.as_deref()?;
        self.data.stations.iter().find(|s| s.station == selected)
    }

    pub fn station_view(&self, station: &str) -> Result<StationView> {
        let summary = self
            .data
            .stations
            .iter()
            .find(|s| s.station == station)
            .ok_or_else(|| ProcessingError::StationNotFound {
                station: station.to_string(),
            })?;

        Ok(StationView {
            summary: summary.clone(),
            details: details_text(summary),
            series: station_series(&self.data.readings, station),
            line_color: self
                .color_scale
                .and_then(|scale| scale.color(summary.avg_temperature))
                .map(|c| c.to_hex()),
        })
    }
}

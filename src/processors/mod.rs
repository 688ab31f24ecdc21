pub mod normalizer;
pub mod pipeline;
pub mod state_filter;
pub mod station_aggregator;

pub use normalizer::{daily_temperature, fahrenheit_to_celsius, normalize, normalize_all};
pub use pipeline::{DashboardData, Pipeline};
pub use state_filter::{
    apply_filter, available_states, filter_stations, FilterOutcome, FilterState, SelectionEvent,
};
pub use station_aggregator::{StationAggregator, StationGroup};

pub mod color_scale;
pub mod dashboard;
pub mod markers;
pub mod scatter;
pub mod time_series;

pub use color_scale::{interpolate_rd_yl_bu, LegendEntry, Rgb, TemperatureColorScale};
pub use dashboard::{Dashboard, StationView};
pub use markers::{details_text, marker_radius, popup_text, StationMarker};
pub use scatter::{
    BrushHighlight, BrushSelection, Extent, PointStyle, ScatterPoint, ScatterSelection, ScatterView,
};
pub use time_series::{station_series, SeriesDomain, StationSeries};

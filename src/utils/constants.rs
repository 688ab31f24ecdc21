/// Required CSV header columns
pub const COL_STATION: &str = "station";
pub const COL_STATE: &str = "state";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_ELEVATION: &str = "elevation";
pub const COL_DATE: &str = "date";
pub const COL_TMIN: &str = "TMIN";
pub const COL_TMAX: &str = "TMAX";
pub const COL_TAVG: &str = "TAVG";
pub const COL_AWND: &str = "AWND";
pub const COL_SNOW: &str = "SNOW";
pub const COL_SNWD: &str = "SNWD";
pub const COL_PRCP: &str = "PRCP";

pub const REQUIRED_COLUMNS: [&str; 13] = [
    COL_STATION,
    COL_STATE,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_ELEVATION,
    COL_DATE,
    COL_TMIN,
    COL_TMAX,
    COL_TAVG,
    COL_AWND,
    COL_SNOW,
    COL_SNWD,
    COL_PRCP,
];

/// Compact date format length (YYYYMMDD)
pub const COMPACT_DATE_LEN: usize = 8;

/// Fahrenheit to Celsius
pub const FREEZING_POINT_F: f64 = 32.0;
pub const CELSIUS_PER_FAHRENHEIT: f64 = 5.0 / 9.0;

/// Marker sizing
pub const MARKER_BASE_RADIUS: f64 = 4.0;
pub const MARKER_MAX_RADIUS: f64 = 8.0;
pub const MARKER_READINGS_PER_PIXEL: f64 = 150.0;

/// Legend
pub const DEFAULT_LEGEND_BINS: usize = 5;

/// Time-series chart padding around the observed temperatures (°C)
pub const SERIES_DOMAIN_PADDING: f64 = 2.0;

/// Scatter view defaults
pub const DEFAULT_SCATTER_LIMIT: usize = 2000;
pub const PRECIP_RADIUS_MIN: f64 = 2.0;
pub const PRECIP_RADIUS_MAX: f64 = 15.0;
pub const BRUSH_SELECTED_OPACITY: f64 = 0.7;
pub const BRUSH_DIMMED_OPACITY: f64 = 0.1;

/// Scatter fill, light blue (coldest TAVG) to light pink (warmest)
pub const SCATTER_FILL_COLD: (u8, u8, u8) = (0xad, 0xd8, 0xe6);
pub const SCATTER_FILL_WARM: (u8, u8, u8) = (0xff, 0xb6, 0xc1);

/// Point styles while a station is clicked
pub const POINT_RADIUS: f64 = 5.0;
pub const POINT_STROKE_WIDTH: f64 = 0.5;
pub const POINT_CLEARED_OPACITY: f64 = 0.8;
pub const POINT_DIMMED_OPACITY: f64 = 0.6;
pub const SELECTED_POINT_RADIUS: f64 = 8.0;
pub const SELECTED_POINT_STROKE_WIDTH: f64 = 2.0;
pub const SELECTED_POINT_OPACITY: f64 = 1.0;

/// Albers USA defaults
pub const ALBERS_DEFAULT_SCALE: f64 = 1070.0;
pub const ALBERS_DEFAULT_TRANSLATE: (f64, f64) = (480.0, 250.0);
pub const SCATTER_MAP_SCALE: f64 = 1000.0;
pub const SCATTER_MAP_TRANSLATE: (f64, f64) = (350.0, 300.0);

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WXDASH";

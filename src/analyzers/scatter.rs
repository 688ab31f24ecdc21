use crate::analyzers::color_scale::Rgb;
use crate::models::NormalizedReading;
use crate::utils::constants::*;
use crate::utils::projection::AlbersUsa;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// A reading with every value the scatter view and its bubble map need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub station: String,
    pub date: NaiveDate,
    /// °F, as reported
    pub tavg: f64,
    /// mph
    pub awnd: f64,
    /// inches
    pub prcp: f64,
    /// Albers USA pixel position
    pub map_position: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc: Option<Extent>, v| match acc {
            None => Some(Extent { min: v, max: v }),
            Some(e) => Some(Extent {
                min: e.min.min(v),
                max: e.max.max(v),
            }),
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Rectangle brushed over the scatter plot, in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSelection {
    pub temperature: Extent,
    pub wind: Extent,
}

impl BrushSelection {
    /// Corners may come in any order.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            temperature: Extent {
                min: a.0.min(b.0),
                max: a.0.max(b.0),
            },
            wind: Extent {
                min: a.1.min(b.1),
                max: a.1.max(b.1),
            },
        }
    }

    pub fn contains(&self, point: &ScatterPoint) -> bool {
        self.temperature.contains(point.tavg) && self.wind.contains(point.awnd)
    }
}

/// Outcome of a brush gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum BrushHighlight {
    /// No active brush: every point keeps full opacity
    Cleared,
    /// Stations with at least one point inside the brush
    Stations(BTreeSet<String>),
}

impl BrushHighlight {
    pub fn opacity(&self, point: &ScatterPoint) -> f64 {
        match self {
            BrushHighlight::Cleared => BRUSH_SELECTED_OPACITY,
            BrushHighlight::Stations(selected) if selected.contains(&point.station) => {
                BRUSH_SELECTED_OPACITY
            }
            BrushHighlight::Stations(_) => BRUSH_DIMMED_OPACITY,
        }
    }
}

/// Radius, stroke and opacity of one point, shared by the scatter plot and the bubble map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointStyle {
    pub radius: f64,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Station picked by clicking a point. Clicking the same station again clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScatterSelection {
    station: Option<String>,
}

impl ScatterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click on a point of `station`. Returns whether a station is selected afterwards.
    pub fn toggle(&mut self, station: &str) -> bool {
        if self.station.as_deref() == Some(station) {
            debug!("Cleared scatter selection of {}", station);
            self.station = None;
        } else {
            debug!("Selected {} in the scatter view", station);
            self.station = Some(station.to_string());
        }
        self.station.is_some()
    }

    pub fn selected(&self) -> Option<&str> {
        self.station.as_deref()
    }

    pub fn style(&self, point: &ScatterPoint) -> PointStyle {
        match self.station.as_deref() {
            None => PointStyle {
                radius: POINT_RADIUS,
                stroke_width: POINT_STROKE_WIDTH,
                opacity: POINT_CLEARED_OPACITY,
            },
            Some(station) if station == point.station => PointStyle {
                radius: SELECTED_POINT_RADIUS,
                stroke_width: SELECTED_POINT_STROKE_WIDTH,
                opacity: SELECTED_POINT_OPACITY,
            },
            Some(_) => PointStyle {
                radius: POINT_RADIUS,
                stroke_width: POINT_STROKE_WIDTH,
                opacity: POINT_DIMMED_OPACITY,
            },
        }
    }
}

/// Temperature vs. wind scatter, linked to a precipitation bubble map.
#[derive(Debug, Clone)]
pub struct ScatterView {
    points: Vec<ScatterPoint>,
    temperature: Option<Extent>,
    wind: Option<Extent>,
    precipitation: Option<Extent>,
}

impl ScatterView {
    /// Keep the first `limit` readings that have location, TAVG, PRCP and
    /// AWND and that project onto the map.
    pub fn build(readings: &[NormalizedReading], projection: &AlbersUsa, limit: usize) -> Self {
        let points: Vec<ScatterPoint> = readings
            .iter()
            .filter_map(|r| Self::clean_point(r, projection))
            .take(limit)
            .collect();

        debug!("Scatter view keeps {} of {} readings", points.len(), readings.len());

        Self {
            temperature: Extent::of(points.iter().map(|p| p.tavg)),
            wind: Extent::of(points.iter().map(|p| p.awnd)),
            precipitation: Extent::of(points.iter().map(|p| p.prcp)),
            points,
        }
    }

    fn clean_point(reading: &NormalizedReading, projection: &AlbersUsa) -> Option<ScatterPoint> {
        let r = &reading.reading;
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

        let tavg = finite(r.tavg)?;
        let awnd = finite(r.awnd)?;
        let prcp = finite(r.prcp)?;
        if !r.has_location() {
            return None;
        }
        let map_position = projection.project(r.longitude, r.latitude)?;

        Some(ScatterPoint {
            station: r.station.clone(),
            date: r.date,
            tavg,
            awnd,
            prcp,
            map_position,
        })
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    pub fn temperature_extent(&self) -> Option<Extent> {
        self.temperature
    }

    pub fn wind_extent(&self) -> Option<Extent> {
        self.wind
    }

    pub fn precipitation_extent(&self) -> Option<Extent> {
        self.precipitation
    }

    /// Bubble radius: square-root scale from the PRCP extent to [2, 15] px.
    pub fn precipitation_radius(&self, prcp: f64) -> f64 {
        let Some(extent) = self.precipitation else {
            return f64::NAN;
        };

        let sqrt = |v: f64| v.signum() * v.abs().sqrt();
        let (d0, d1) = (sqrt(extent.min), sqrt(extent.max));
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            (sqrt(prcp) - d0) / span
        };

        PRECIP_RADIUS_MIN + t * (PRECIP_RADIUS_MAX - PRECIP_RADIUS_MIN)
    }

    /// Bubble fill: linear from light blue at the coldest TAVG to light pink
    /// at the warmest. `None` for an empty view or a NaN value.
    pub fn fill_color(&self, tavg: f64) -> Option<Rgb> {
        let extent = self.temperature?;
        if tavg.is_nan() {
            return None;
        }

        let span = extent.max - extent.min;
        let t = if span == 0.0 {
            0.5
        } else {
            (tavg - extent.min) / span
        };

        Some(Rgb::from(SCATTER_FILL_COLD).lerp(Rgb::from(SCATTER_FILL_WARM), t))
    }

    pub fn brush(&self, selection: Option<&BrushSelection>) -> BrushHighlight {
        match selection {
            None => BrushHighlight::Cleared,
            Some(rect) => BrushHighlight::Stations(
                self.points
                    .iter()
                    .filter(|p| rect.contains(p))
                    .map(|p| p.station.clone())
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reading;
    use crate::processors::normalize;

    fn reading(station: &str, lon: f64, lat: f64, tavg: Option<f64>, awnd: f64, prcp: f64) -> NormalizedReading {
        let mut builder = Reading::builder()
            .station(station)
            .state("XX")
            .date(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap())
            .coordinates(lat, lon)
            .wind_speed(awnd)
            .precipitation(prcp);
        if let Some(t) = tavg {
            builder = builder.tavg(t);
        }
        normalize(builder.build().unwrap())
    }

    fn sample() -> Vec<NormalizedReading> {
        vec![
            reading("SF", -122.4194, 37.7749, Some(58.0), 9.0, 0.25),
            reading("NYC", -74.0059, 40.7128, Some(40.0), 12.0, 1.0),
            reading("PARIS", 2.3522, 48.8566, Some(50.0), 5.0, 0.0), // does not project
            reading("TUL", -95.9928, 36.1540, None, 7.0, 0.0),        // no TAVG
            reading("TUL", -95.9928, 36.1540, Some(62.0), 15.0, 0.0),
        ]
    }

    #[test]
    fn test_clean_points() {
        let view = ScatterView::build(&sample(), &AlbersUsa::with_transform(1000.0, (350.0, 300.0)), 2000);
        let stations: Vec<&str> = view.points().iter().map(|p| p.station.as_str()).collect();

        assert_eq!(stations, vec!["SF", "NYC", "TUL"]);
        assert_eq!(view.temperature_extent(), Some(Extent { min: 40.0, max: 62.0 }));
        assert_eq!(view.wind_extent(), Some(Extent { min: 9.0, max: 15.0 }));
    }

    #[test]
    fn test_limit_keeps_first_points() {
        let view = ScatterView::build(&sample(), &AlbersUsa::new(), 2);
        let stations: Vec<&str> = view.points().iter().map(|p| p.station.as_str()).collect();

        assert_eq!(stations, vec!["SF", "NYC"]);
    }

    #[test]
    fn test_precipitation_radius() {
        let view = ScatterView::build(&sample(), &AlbersUsa::new(), 2000);

        assert!((view.precipitation_radius(0.0) - 2.0).abs() < 1e-9);
        assert!((view.precipitation_radius(1.0) - 15.0).abs() < 1e-9);
        // sqrt(0.25) = 0.5, halfway
        assert!((view.precipitation_radius(0.25) - 8.5).abs() < 1e-9);
    }

    #[test]
    fn test_brush_selects_stations() {
        let view = ScatterView::build(&sample(), &AlbersUsa::new(), 2000);
        let rect = BrushSelection::from_corners((65.0, 8.0), (55.0, 16.0));

        let highlight = view.brush(Some(&rect));
        let expected: BTreeSet<String> = ["SF", "TUL"].iter().map(|s| s.to_string()).collect();
        assert_eq!(highlight, BrushHighlight::Stations(expected));

        let nyc = &view.points()[1];
        assert_eq!(highlight.opacity(nyc), BRUSH_DIMMED_OPACITY);
        assert_eq!(highlight.opacity(&view.points()[0]), BRUSH_SELECTED_OPACITY);
    }

    #[test]
    fn test_cleared_brush() {
        let view = ScatterView::build(&sample(), &AlbersUsa::new(), 2000);
        let highlight = view.brush(None);

        assert_eq!(highlight, BrushHighlight::Cleared);
        assert!(view
            .points()
            .iter()
            .all(|p| highlight.opacity(p) == BRUSH_SELECTED_OPACITY));
    }

    #[test]
    fn test_fill_color_spans_temperature_extent() {
        let view = ScatterView::build(&sample(), &AlbersUsa::new(), 2000);

        assert_eq!(view.fill_color(40.0).unwrap().to_hex(), "#add8e6");
        assert_eq!(view.fill_color(62.0).unwrap().to_hex(), "#ffb6c1");
        // halfway: (173+255)/2, (216+182)/2, (230+193)/2 rounded
        assert_eq!(view.fill_color(51.0), Some(Rgb { r: 214, g: 199, b: 212 }));
        assert!(view.fill_color(f64::NAN).is_none());
    }

    #[test]
    fn test_fill_color_single_temperature() {
        let readings = vec![reading("SF", -122.4194, 37.7749, Some(58.0), 9.0, 0.25)];
        let view = ScatterView::build(&readings, &AlbersUsa::new(), 2000);

        assert_eq!(view.fill_color(58.0), Some(Rgb { r: 214, g: 199, b: 212 }));
    }

    #[test]
    fn test_click_selection_toggles() {
        let view = ScatterView::build(&sample(), &AlbersUsa::new(), 2000);
        let (sf, nyc) = (&view.points()[0], &view.points()[1]);
        let mut selection = ScatterSelection::new();

        assert_eq!(selection.style(sf).opacity, POINT_CLEARED_OPACITY);

        assert!(selection.toggle("SF"));
        assert_eq!(selection.selected(), Some("SF"));
        assert_eq!(
            selection.style(sf),
            PointStyle {
                radius: 8.0,
                stroke_width: 2.0,
                opacity: 1.0
            }
        );
        assert_eq!(
            selection.style(nyc),
            PointStyle {
                radius: 5.0,
                stroke_width: 0.5,
                opacity: 0.6
            }
        );

        // Clicking another station moves the selection
        assert!(selection.toggle("NYC"));
        assert_eq!(selection.style(nyc).radius, SELECTED_POINT_RADIUS);
        assert_eq!(selection.style(sf).radius, POINT_RADIUS);

        // Clicking it again clears
        assert!(!selection.toggle("NYC"));
        assert_eq!(selection.selected(), None);
        assert_eq!(selection.style(nyc).opacity, POINT_CLEARED_OPACITY);
    }

    #[test]
    fn test_empty_view() {
        let view = ScatterView::build(&[], &AlbersUsa::new(), 2000);

        assert!(view.points().is_empty());
        assert!(view.temperature_extent().is_none());
        assert!(view.precipitation_radius(1.0).is_nan());
        assert!(view.fill_color(50.0).is_none());
    }
}

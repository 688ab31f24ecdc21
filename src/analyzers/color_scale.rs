use crate::models::StationSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ColorBrewer RdYlBu, 11 classes, red (hot) to blue (cold).
const RD_YL_BU: [(u8, u8, u8); 11] = [
    (0xa5, 0x00, 0x26),
    (0xd7, 0x30, 0x27),
    (0xf4, 0x6d, 0x43),
    (0xfd, 0xae, 0x61),
    (0xfe, 0xe0, 0x90),
    (0xff, 0xff, 0xbf),
    (0xe0, 0xf3, 0xf8),
    (0xab, 0xd9, 0xe9),
    (0x74, 0xad, 0xd1),
    (0x45, 0x75, 0xb4),
    (0x31, 0x36, 0x95),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Straight per-channel interpolation towards `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| channel(a as f64 + (b as f64 - a as f64) * t);
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Uniform cubic B-spline through `values`, sampled at `t` in [0, 1].
fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };

    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;

    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Continuous RdYlBu ramp; 0 is the red end, 1 the blue end.
pub fn interpolate_rd_yl_bu(t: f64) -> Rgb {
    let reds: Vec<f64> = RD_YL_BU.iter().map(|c| c.0 as f64).collect();
    let greens: Vec<f64> = RD_YL_BU.iter().map(|c| c.1 as f64).collect();
    let blues: Vec<f64> = RD_YL_BU.iter().map(|c| c.2 as f64).collect();

    Rgb {
        r: channel(basis_spline(&reds, t)),
        g: channel(basis_spline(&greens, t)),
        b: channel(basis_spline(&blues, t)),
    }
}

/// Maps a station's average °C to a marker color.
///
/// The domain runs from the warmest to the coldest station average, so the
/// hottest station sits at the red end of the ramp. It is derived once from
/// the unfiltered station list and must not be rebuilt when the state filter
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureColorScale {
    hottest: f64,
    coldest: f64,
}

impl TemperatureColorScale {
    /// `None` when no station has a real average.
    pub fn from_stations(stations: &[StationSummary]) -> Option<Self> {
        let averages = stations
            .iter()
            .filter(|s| s.has_average())
            .map(|s| s.avg_temperature);

        let (min, max) = averages.fold(None, |acc: Option<(f64, f64)>, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })?;

        Some(Self::with_domain(max, min))
    }

    pub fn with_domain(hottest: f64, coldest: f64) -> Self {
        Self { hottest, coldest }
    }

    /// `(hottest, coldest)`, the reversed domain.
    pub fn domain(&self) -> (f64, f64) {
        (self.hottest, self.coldest)
    }

    /// Position of `value` along the ramp; `None` for NaN.
    pub fn position(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let span = self.coldest - self.hottest;
        if span == 0.0 {
            return Some(0.5);
        }
        Some((value - self.hottest) / span)
    }

    pub fn color(&self, value: f64) -> Option<Rgb> {
        self.position(value).map(interpolate_rd_yl_bu)
    }

    /// Evenly spaced legend bins from `floor(coldest)` up to `ceil(hottest)`.
    pub fn legend(&self, bins: usize) -> Vec<LegendEntry> {
        let start = self.coldest.floor();
        let stop = self.hottest.ceil();
        let step = (stop - start) / bins as f64;

        let count = ((stop - start) / step).ceil();
        if !count.is_finite() || count <= 0.0 {
            return Vec::new();
        }

        let bounds: Vec<f64> = (0..count as usize).map(|i| start + i as f64 * step).collect();

        bounds
            .iter()
            .enumerate()
            .filter_map(|(i, &lower)| {
                self.color(lower).map(|color| LegendEntry {
                    lower,
                    upper: bounds.get(i + 1).copied(),
                    color,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub lower: f64,
    /// `None` for the open-ended top bin
    pub upper: Option<f64>,
    pub color: Rgb,
}

impl LegendEntry {
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{:.1}–{:.1}", self.lower, upper),
            None => format!("{:.1}+", self.lower),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::{apply_filter, SelectionEvent};
    use pretty_assertions::assert_eq;

    fn station(id: &str, state: &str, avg: f64) -> StationSummary {
        StationSummary::new(id.to_string(), state.to_string(), 35.0, -100.0, 0.0, avg, 10)
    }

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(interpolate_rd_yl_bu(0.0).to_hex(), "#a50026");
        assert_eq!(interpolate_rd_yl_bu(1.0).to_hex(), "#313695");
        assert_eq!(interpolate_rd_yl_bu(-3.0), interpolate_rd_yl_bu(0.0));
    }

    #[test]
    fn test_domain_is_reversed() {
        let stations = vec![station("A", "CA", 20.0), station("B", "MN", -5.0)];
        let scale = TemperatureColorScale::from_stations(&stations).unwrap();

        assert_eq!(scale.domain(), (20.0, -5.0));
        assert_eq!(scale.position(20.0), Some(0.0));
        assert_eq!(scale.position(-5.0), Some(1.0));
        assert_eq!(scale.color(20.0).unwrap().to_hex(), "#a50026");
        assert_eq!(scale.color(-5.0).unwrap().to_hex(), "#313695");
    }

    #[test]
    fn test_nan_averages_ignored_and_uncolored() {
        let stations = vec![
            station("A", "CA", 10.0),
            station("B", "CA", f64::NAN),
            station("C", "CA", 0.0),
        ];
        let scale = TemperatureColorScale::from_stations(&stations).unwrap();

        assert_eq!(scale.domain(), (10.0, 0.0));
        assert_eq!(scale.color(f64::NAN), None);
    }

    #[test]
    fn test_no_real_averages() {
        let stations = vec![station("A", "CA", f64::NAN)];
        assert!(TemperatureColorScale::from_stations(&stations).is_none());
        assert!(TemperatureColorScale::from_stations(&[]).is_none());
    }

    #[test]
    fn test_degenerate_domain_uses_midpoint() {
        let scale = TemperatureColorScale::from_stations(&[station("A", "CA", 7.0)]).unwrap();

        assert_eq!(scale.position(7.0), Some(0.5));
        assert_eq!(scale.color(7.0), Some(interpolate_rd_yl_bu(0.5)));
    }

    #[test]
    fn test_colors_stable_across_filters() {
        let stations = vec![
            station("A", "CA", 18.0),
            station("B", "MN", -4.0),
            station("C", "TX", 24.0),
        ];
        let scale = TemperatureColorScale::from_stations(&stations).unwrap();
        let before: Vec<Option<Rgb>> = stations.iter().map(|s| scale.color(s.avg_temperature)).collect();

        let visible = apply_filter(&SelectionEvent::states(["MN"]), &stations);
        assert_eq!(visible.len(), 1);

        // Same scale, same color for the surviving station
        assert_eq!(scale.color(visible[0].avg_temperature), before[1]);
        // A scale rebuilt from the filtered view would disagree
        let rebuilt = TemperatureColorScale::from_stations(&visible).unwrap();
        assert_ne!(rebuilt.color(visible[0].avg_temperature), before[1]);
    }

    #[test]
    fn test_legend_bins() {
        let scale = TemperatureColorScale::with_domain(19.2, -4.6);
        let legend = scale.legend(5);

        // floor(-4.6) = -5, ceil(19.2) = 20, step 5
        let lowers: Vec<f64> = legend.iter().map(|e| e.lower).collect();
        assert_eq!(lowers, vec![-5.0, 0.0, 5.0, 10.0, 15.0]);
        assert_eq!(legend[0].upper, Some(0.0));
        assert_eq!(legend[4].upper, None);
        assert_eq!(legend[0].label(), "-5.0–0.0");
        assert_eq!(legend[4].label(), "15.0+");
    }

    #[test]
    fn test_legend_empty_for_integer_degenerate_domain() {
        let scale = TemperatureColorScale::with_domain(10.0, 10.0);
        assert!(scale.legend(5).is_empty());
    }
}

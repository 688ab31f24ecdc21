//! Albers USA composite projection.
//!
//! Conic equal-area projections for the lower 48 states with Alaska and
//! Hawaii drawn as insets below, using the same parameters as d3's
//! `geoAlbersUsa`, so station pixels line up with map layers rendered by it.

use crate::utils::constants::{ALBERS_DEFAULT_SCALE, ALBERS_DEFAULT_TRANSLATE};
use std::f64::consts::{PI, TAU};

const EPSILON: f64 = 1e-6;

/// Raw conic equal-area projection between two standard parallels.
#[derive(Debug, Clone, Copy)]
struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
}

impl ConicEqualArea {
    fn new(parallel0: f64, parallel1: f64) -> Self {
        let sy0 = parallel0.to_radians().sin();
        let n = (sy0 + parallel1.to_radians().sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        Self {
            n,
            c,
            r0: c.sqrt() / n,
        }
    }

    fn raw(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).sqrt() / self.n;
        let theta = lambda * self.n;
        (r * theta.sin(), self.r0 - r * theta.cos())
    }
}

/// Axis-aligned pixel rectangle, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipExtent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl ClipExtent {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }
}

/// A rotated, centered, scaled conic projection clipped to a pixel extent.
#[derive(Debug, Clone, Copy)]
struct ConicProjection {
    raw: ConicEqualArea,
    rotate: f64,
    center: (f64, f64),
    scale: f64,
    translate: (f64, f64),
    clip: ClipExtent,
}

impl ConicProjection {
    fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        let mut lambda = longitude.to_radians() + self.rotate;
        if lambda.abs() > PI {
            lambda -= (lambda / TAU).round() * TAU;
        }

        let (px, py) = self.raw.raw(lambda, latitude.to_radians());
        let (cx, cy) = self.raw.raw(self.center.0.to_radians(), self.center.1.to_radians());

        let x = self.translate.0 + self.scale * (px - cx);
        let y = self.translate.1 - self.scale * (py - cy);

        self.clip.contains(x, y).then_some((x, y))
    }
}

/// Composite projection of the United States.
#[derive(Debug, Clone)]
pub struct AlbersUsa {
    scale: f64,
    translate: (f64, f64),
    lower48: ConicProjection,
    alaska: ConicProjection,
    hawaii: ConicProjection,
}

impl AlbersUsa {
    pub fn new() -> Self {
        Self::with_transform(ALBERS_DEFAULT_SCALE, ALBERS_DEFAULT_TRANSLATE)
    }

    pub fn with_transform(scale: f64, translate: (f64, f64)) -> Self {
        let (x, y) = translate;
        let k = scale;

        let lower48 = ConicProjection {
            raw: ConicEqualArea::new(29.5, 45.5),
            rotate: 96f64.to_radians(),
            center: (-0.6, 38.7),
            scale: k,
            translate: (x, y),
            clip: ClipExtent {
                x0: x - 0.455 * k,
                y0: y - 0.238 * k,
                x1: x + 0.455 * k,
                y1: y + 0.238 * k,
            },
        };

        let alaska = ConicProjection {
            raw: ConicEqualArea::new(55.0, 65.0),
            rotate: 154f64.to_radians(),
            center: (-2.0, 58.5),
            scale: 0.35 * k,
            translate: (x - 0.307 * k, y + 0.201 * k),
            clip: ClipExtent {
                x0: x - 0.425 * k + EPSILON,
                y0: y + 0.120 * k + EPSILON,
                x1: x - 0.214 * k - EPSILON,
                y1: y + 0.234 * k - EPSILON,
            },
        };

        let hawaii = ConicProjection {
            raw: ConicEqualArea::new(8.0, 18.0),
            rotate: 157f64.to_radians(),
            center: (-3.0, 19.9),
            scale: k,
            translate: (x - 0.205 * k, y + 0.212 * k),
            clip: ClipExtent {
                x0: x - 0.214 * k + EPSILON,
                y0: y + 0.166 * k + EPSILON,
                x1: x - 0.115 * k - EPSILON,
                y1: y + 0.234 * k - EPSILON,
            },
        };

        Self {
            scale,
            translate,
            lower48,
            alaska,
            hawaii,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> (f64, f64) {
        self.translate
    }

    /// Pixel position of a lon/lat in degrees, or `None` when the point falls
    /// outside all three insets (or is NaN).
    pub fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        self.lower48
            .project(longitude, latitude)
            .or_else(|| self.alaska.project(longitude, latitude))
            .or_else(|| self.hawaii.project(longitude, latitude))
    }
}

impl Default for AlbersUsa {
    fn default() -> Self {
        Self::new()
    }
}

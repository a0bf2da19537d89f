use geo_types::Coord;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ViewpointConfig;
use crate::consts::{MIN_VIEW_SCALE, METERS_PER_INCH, POINT_EXTENT_SCALE, SCREEN_DPI};
use crate::geo::{GeoExtent, GeoPoint};
use crate::projection::{project, unproject, wrap_lon};

/// Where the map should look: a centre at a scale, or an extent to fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Viewpoint {
    Center { center: GeoPoint, scale: f64 },
    Extent(GeoExtent),
}

impl Viewpoint {
    pub fn center(center: GeoPoint, scale: f64) -> Self {
        Viewpoint::Center { center, scale }
    }

    pub fn extent(extent: GeoExtent) -> Self {
        Viewpoint::Extent(extent)
    }

    /// Geographic point the view is centred on.
    pub fn target(&self) -> GeoPoint {
        match self {
            Viewpoint::Center { center, .. } => *center,
            Viewpoint::Extent(extent) => extent.center(),
        }
    }
}

impl std::fmt::Display for Viewpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewpoint::Center { center, scale } => write!(
                f,
                "{:.4}, {:.4} at 1:{:.0}",
                center.lat, center.lon, scale
            ),
            Viewpoint::Extent(e) => write!(
                f,
                "extent {:.4}, {:.4} .. {:.4}, {:.4}",
                e.min.lat, e.min.lon, e.max.lat, e.max.lon
            ),
        }
    }
}

/// Ground resolution (projected metres per pixel) of a scale denominator.
pub fn scale_to_resolution(scale: f64) -> f64 {
    scale * METERS_PER_INCH / SCREEN_DPI
}

/// Scale denominator of a ground resolution.
pub fn resolution_to_scale(resolution: f64) -> f64 {
    resolution * SCREEN_DPI / METERS_PER_INCH
}

/// Draw a random viewpoint anywhere on the globe.
///
/// Latitude and longitude are uniform over their full ranges. The scale is
/// uniform in log10-space between the configured bounds, so every zoom level
/// is about equally likely.
pub fn random_viewpoint<R: Rng + ?Sized>(rng: &mut R, config: &ViewpointConfig) -> Viewpoint {
    let lat = rng.gen_range(-90.0..=90.0);
    let lon = rng.gen_range(-180.0..=180.0);
    let scale = random_scale(rng, config.min_scale, config.max_scale);
    Viewpoint::center(GeoPoint::new(lat, lon), scale)
}

/// Log-uniform scale in `[min_scale, max_scale]`.
pub fn random_scale<R: Rng + ?Sized>(rng: &mut R, min_scale: f64, max_scale: f64) -> f64 {
    let min_log = min_scale.log10();
    let max_log = max_scale.log10();
    if max_log <= min_log {
        return min_scale;
    }
    let scale_log = rng.gen_range(min_log..=max_log);
    // powf can land a hair outside the bounds.
    10f64.powf(scale_log).clamp(min_scale, max_scale)
}

/// Concrete display state: projected centre and ground resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: Coord<f64>,
    /// Projected metres per pixel.
    pub resolution: f64,
}

impl Camera {
    pub fn new(center: GeoPoint, scale: f64) -> Self {
        Self {
            center: project(center),
            resolution: scale_to_resolution(scale),
        }
    }

    pub fn scale(&self) -> f64 {
        resolution_to_scale(self.resolution)
    }

    pub fn geo_center(&self) -> GeoPoint {
        unproject(self.center)
    }

    /// Resolve a viewpoint for a view of `view_size` pixels.
    ///
    /// Extents are fitted with `padding` (fraction of the view on each side)
    /// kept free; an extent without area is shown at a fixed scale.
    pub fn for_viewpoint(viewpoint: &Viewpoint, view_size: [f64; 2], padding: f64) -> Self {
        match viewpoint {
            Viewpoint::Center { center, scale } => Self::new(*center, *scale),
            Viewpoint::Extent(extent) => Self::fit_extent(extent, view_size, padding),
        }
    }

    fn fit_extent(extent: &GeoExtent, view_size: [f64; 2], padding: f64) -> Self {
        let a = project(extent.min);
        let b = project(extent.max);
        let center = Coord {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
        };
        let width_m = (b.x - a.x).abs();
        let height_m = (b.y - a.y).abs();
        if width_m <= f64::EPSILON && height_m <= f64::EPSILON {
            return Self {
                center,
                resolution: scale_to_resolution(POINT_EXTENT_SCALE),
            };
        }

        let usable = (1.0 - 2.0 * padding.clamp(0.0, 0.45)).max(0.1);
        let avail_w = (view_size[0] * usable).max(1.0);
        let avail_h = (view_size[1] * usable).max(1.0);
        let resolution = (width_m / avail_w)
            .max(height_m / avail_h)
            .max(scale_to_resolution(MIN_VIEW_SCALE));
        Self { center, resolution }
    }

    /// Screen offset (pixels, y down) of a projected point from the view centre.
    pub fn to_screen_offset(&self, p: Coord<f64>) -> [f64; 2] {
        [
            (p.x - self.center.x) / self.resolution,
            (self.center.y - p.y) / self.resolution,
        ]
    }

    /// Inverse of [`Camera::to_screen_offset`].
    pub fn from_screen_offset(&self, offset: [f64; 2]) -> Coord<f64> {
        Coord {
            x: self.center.x + offset[0] * self.resolution,
            y: self.center.y - offset[1] * self.resolution,
        }
    }

    /// Geographic position under a screen offset. Points past the antimeridian
    /// wrap around to the other side of the world.
    pub fn geo_at(&self, offset: [f64; 2]) -> GeoPoint {
        let p = unproject(self.from_screen_offset(offset));
        GeoPoint::new(p.lat, wrap_lon(p.lon))
    }
}

use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in [-90, 90], longitude in [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<Coord<f64>> for GeoPoint {
    /// KML and `geo_types` both order coordinates as (lon, lat).
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lon: c.x }
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

/// Minimal lon/lat rectangle enclosing some geographic content.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoExtent {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl GeoExtent {
    /// Build an extent from two corners in any order.
    pub fn new(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            min: GeoPoint::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            max: GeoPoint::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    pub fn from_point(p: GeoPoint) -> Self {
        Self { min: p, max: p }
    }

    /// Extent of all points, or `None` when the iterator is empty.
    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut extent = Self::from_point(first);
        for p in iter {
            extent.include(p);
        }
        Some(extent)
    }

    pub fn include(&mut self, p: GeoPoint) {
        self.min.lat = self.min.lat.min(p.lat);
        self.min.lon = self.min.lon.min(p.lon);
        self.max.lat = self.max.lat.max(p.lat);
        self.max.lon = self.max.lon.max(p.lon);
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lon + self.max.lon) / 2.0,
        )
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max.lon - self.min.lon
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max.lat - self.min.lat
    }

    /// True when the extent covers no area along at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= f64::EPSILON || self.height() <= f64::EPSILON
    }
}

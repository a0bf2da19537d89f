//! Spherical Web Mercator (EPSG:3857), the projection of the map display.

use std::f64::consts::PI;

use geo_types::Coord;

use crate::consts::{EARTH_RADIUS_M, MAX_MERCATOR_LAT};
use crate::geo::GeoPoint;

/// Half the projected width of the world, in metres.
pub const HALF_WORLD_M: f64 = PI * EARTH_RADIUS_M;

/// Project a geographic point to Web Mercator metres.
///
/// Latitudes beyond the projection limit are clamped, so poles map to the
/// top and bottom edges of the world square.
pub fn project(p: GeoPoint) -> Coord<f64> {
    let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let x = EARTH_RADIUS_M * p.lon.to_radians();
    let y = EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    Coord { x, y }
}

/// Inverse of [`project`].
pub fn unproject(c: Coord<f64>) -> GeoPoint {
    let lon = (c.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (c.y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    GeoPoint::new(lat, lon)
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

//! Spherical-earth navigation math.
//!
//! All angles are radians, all distances meters. Latitude is positive north,
//! longitude positive east.

use super::vec2d::Vec2D;
use std::f64::consts::{PI, TAU};
use std::fmt::{Display, Formatter};

/// Earth radius used for every computation, in meters.
pub const RADIUS_EARTH_M: f64 = 6_378_137.0;
/// Meters per international nautical mile.
pub const METERS_PER_NM: f64 = 1852.0;
/// Below this `cos(lat)` a bearing is no longer computed but approximated.
const POLE_COS_LIMIT: f64 = 1e-4;

/// Great-circle distance in meters between two points.
///
/// Uses the spherical law of cosines. The arccos argument is clamped to `[-1, 1]`
/// so identical and antipodal points do not produce `NaN` through rounding.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // cos² + sin² is not always exactly 1, and acos is steep there
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let cos_c = lat1.cos() * lat2.cos() * (lon1 - lon2).cos() + lat1.sin() * lat2.sin();
    RADIUS_EARTH_M * cos_c.clamp(-1.0, 1.0).acos()
}

/// Initial true bearing from point 1 to point 2, in `[0, 2π)`.
///
/// Close to a pole (`cos(lat1) < 1e-4`) the bearing is undefined and this
/// returns `0` from the southern hemisphere (or the equator) and `π` from the
/// northern one.
pub fn heading(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1.cos() < POLE_COS_LIMIT {
        return if lat1 <= 0.0 { 0.0 } else { PI };
    }
    let d_lon = lon2 - lon1;
    let b = (d_lon.sin() * lat2.cos())
        .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos());
    normalize_heading(b)
}

/// Projects a point `distance_m` meters along `bearing` from `(lat, lon)`.
///
/// # Returns
/// `(lat, lon)` of the destination, longitude in `[-π, π)`.
pub fn destination_point(lat: f64, lon: f64, distance_m: f64, bearing: f64) -> (f64, f64) {
    let bearing = normalize_heading(bearing);
    let ang = distance_m / RADIUS_EARTH_M;
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_ang, cos_ang) = ang.sin_cos();

    let sin_n_lat = (sin_lat * cos_ang + cos_lat * sin_ang * bearing.cos()).clamp(-1.0, 1.0);
    let n_lat = sin_n_lat.asin();
    let n_lon = lon + (bearing.sin() * sin_ang * cos_lat).atan2(cos_ang - sin_lat * sin_n_lat);
    (n_lat, normalize_longitude(n_lon))
}

/// Wraps any angle into `[0, 2π)`.
pub fn normalize_heading(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Wraps a longitude into `[-π, π)`.
pub fn normalize_longitude(lon: f64) -> f64 { normalize_heading(lon + PI) - PI }

pub fn meters_to_nm(meters: f64) -> f64 { meters / METERS_PER_NM }

pub fn nm_to_meters(nm: f64) -> f64 { nm * METERS_PER_NM }

/// A position on the sphere, radians.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }

    pub const fn lat(&self) -> f64 { self.lat }
    pub const fn lon(&self) -> f64 { self.lon }

    /// `(lat, lon)` in degrees, the unit the simulator expects for placement.
    pub fn to_degrees(self) -> (f64, f64) { (self.lat.to_degrees(), self.lon.to_degrees()) }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance(self.lat, self.lon, other.lat, other.lon)
    }

    pub fn heading_to(&self, other: &GeoPoint) -> f64 {
        heading(self.lat, self.lon, other.lat, other.lon)
    }

    pub fn project(&self, distance_m: f64, bearing: f64) -> GeoPoint {
        destination_point(self.lat, self.lon, distance_m, bearing).into()
    }

    /// Places a local tangent-plane offset (meters, `x` north, `y` east) around
    /// this point after rotating it by `heading`.
    ///
    /// Equirectangular approximation: valid for offsets of a few kilometers away
    /// from the poles.
    pub fn offset_by(&self, offset: Vec2D<f64>, heading: f64) -> GeoPoint {
        let mut p = offset;
        p.rotate(heading);
        let scale = 1.0 / RADIUS_EARTH_M;
        p.scale(scale, scale / self.lat.cos());
        p.translate(self.lat, self.lon);
        GeoPoint::new(p.x(), normalize_longitude(p.y()))
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self { Self::new(lat, lon) }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (lat, lon) = self.to_degrees();
        write!(f, "{lat:.5}, {lon:.5}")
    }
}

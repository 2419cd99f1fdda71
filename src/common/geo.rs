use crate::common::math::wrap_bearing;
use fixed::types::I32F32;

/// Mean earth radius in meters, spherical model.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// A geographic position given as signed degrees of latitude and longitude.
///
/// Angular values are stored as fixed-point `I32F32` degrees and converted
/// to `f64` radians at the trigonometry boundary. Immutable value type.
#[derive(Debug, PartialEq, Eq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    lat: I32F32,
    /// Longitude in degrees, positive east.
    lon: I32F32,
}

impl GeoPoint {
    /// Creates a new point from fixed-point degree components.
    pub const fn new(lat: I32F32, lon: I32F32) -> Self { Self { lat, lon } }

    /// Creates a new point from `f64` degree components.
    pub fn from_deg(lat: f64, lon: f64) -> Self {
        Self {
            lat: I32F32::from_num(lat),
            lon: I32F32::from_num(lon),
        }
    }

    /// Returns the latitude in degrees.
    pub const fn lat(&self) -> I32F32 { self.lat }

    /// Returns the longitude in degrees.
    pub const fn lon(&self) -> I32F32 { self.lon }

    fn lat_rad(&self) -> f64 { self.lat.to_num::<f64>().to_radians() }

    fn lon_rad(&self) -> f64 { self.lon.to_num::<f64>().to_radians() }

    /// Computes the great-circle distance to another point in meters.
    ///
    /// # Arguments
    /// * `other` - The point to measure the distance to.
    ///
    /// # Returns
    /// The haversine distance on the spherical earth model in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = other.lat_rad() - self.lat_rad();
        let d_lon = other.lon_rad() - self.lon_rad();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat_rad().cos() * other.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS * a.sqrt().asin()
    }

    /// Computes the initial great-circle bearing towards another point.
    ///
    /// # Arguments
    /// * `other` - The point to take the bearing towards.
    ///
    /// # Returns
    /// The bearing in degrees, normalized to `[0, 360)`.
    pub fn bearing_to(&self, other: &GeoPoint) -> I32F32 {
        let d_lon = other.lon_rad() - self.lon_rad();
        let y = d_lon.sin() * other.lat_rad().cos();
        let x = self.lat_rad().cos() * other.lat_rad().sin()
            - self.lat_rad().sin() * other.lat_rad().cos() * d_lon.cos();
        wrap_bearing(I32F32::from_num(y.atan2(x).to_degrees()))
    }

    /// Computes the destination point along a bearing at a given distance.
    ///
    /// # Arguments
    /// * `bearing` - The initial bearing in degrees.
    /// * `distance` - The distance to travel in meters.
    ///
    /// # Returns
    /// A new `GeoPoint` at the destination.
    pub fn offset_by(&self, bearing: I32F32, distance: f64) -> GeoPoint {
        let delta = distance / EARTH_RADIUS;
        let theta = bearing.to_num::<f64>().to_radians();
        let lat = (self.lat_rad().sin() * delta.cos()
            + self.lat_rad().cos() * delta.sin() * theta.cos())
        .asin();
        let lon = self.lon_rad()
            + (theta.sin() * delta.sin() * self.lat_rad().cos())
                .atan2(delta.cos() - self.lat_rad().sin() * lat.sin());
        let lon_deg = (lon.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        GeoPoint::from_deg(lat.to_degrees(), lon_deg)
    }

    /// Computes the point at fraction `f` along the great circle to `other`.
    ///
    /// `f = 0` yields `self`, `f = 1` yields `other`. Near-coincident
    /// endpoints fall back to `self`.
    pub fn intermediate_to(&self, other: &GeoPoint, f: f64) -> GeoPoint {
        let delta = self.distance_to(other) / EARTH_RADIUS;
        if delta < 1e-12 {
            return *self;
        }
        let a = ((1.0 - f) * delta).sin() / delta.sin();
        let b = (f * delta).sin() / delta.sin();
        let x = a * self.lat_rad().cos() * self.lon_rad().cos()
            + b * other.lat_rad().cos() * other.lon_rad().cos();
        let y = a * self.lat_rad().cos() * self.lon_rad().sin()
            + b * other.lat_rad().cos() * other.lon_rad().sin();
        let z = a * self.lat_rad().sin() + b * other.lat_rad().sin();
        GeoPoint::from_deg(z.atan2(x.hypot(y)).to_degrees(), y.atan2(x).to_degrees())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.5}, {:.5}]", self.lat, self.lon)
    }
}

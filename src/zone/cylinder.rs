use super::ZoneGeometryError;
use crate::common::geo::GeoPoint;

/// A cylindrical zone: all points within a fixed radius of the waypoint.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CylinderZone {
    /// Radius in meters, always positive.
    radius: f64,
}

impl CylinderZone {
    /// Creates a new cylinder.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NonPositiveRadius`] when `radius <= 0`.
    pub fn new(radius: f64) -> Result<Self, ZoneGeometryError> {
        if radius > 0.0 {
            Ok(Self { radius })
        } else {
            Err(ZoneGeometryError::NonPositiveRadius)
        }
    }

    pub fn radius(&self) -> f64 { self.radius }

    /// Resizes the cylinder.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NonPositiveRadius`] when `radius <= 0`.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), ZoneGeometryError> {
        if radius > 0.0 {
            self.radius = radius;
            Ok(())
        } else {
            Err(ZoneGeometryError::NonPositiveRadius)
        }
    }

    pub fn contains(&self, center: &GeoPoint, point: &GeoPoint) -> bool {
        self.boundary_distance(center, point) <= 0.0
    }

    pub fn boundary_distance(&self, center: &GeoPoint, point: &GeoPoint) -> f64 {
        center.distance_to(point) - self.radius
    }
}

use super::{CylinderZone, SectorZone, ZoneGeometryError};
use crate::common::geo::GeoPoint;
use fixed::types::I32F32;

/// A composite competition zone: the union of a small cylinder around the
/// waypoint and a larger sector.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyholeZone {
    cylinder: CylinderZone,
    sector: SectorZone,
}

impl KeyholeZone {
    /// Creates a new keyhole.
    ///
    /// # Errors
    /// Returns a [`ZoneGeometryError`] when either radius is not positive
    /// or the inner radius does not stay below the outer one.
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        start_bearing: I32F32,
        end_bearing: I32F32,
    ) -> Result<Self, ZoneGeometryError> {
        if inner_radius >= outer_radius {
            return Err(ZoneGeometryError::InnerRadiusNotSmaller);
        }
        Ok(Self {
            cylinder: CylinderZone::new(inner_radius)?,
            sector: SectorZone::new(outer_radius, start_bearing, end_bearing)?,
        })
    }

    pub fn inner_radius(&self) -> f64 { self.cylinder.radius() }

    pub fn outer_radius(&self) -> f64 { self.sector.radius() }

    pub fn start_bearing(&self) -> I32F32 { self.sector.start_bearing() }

    pub fn end_bearing(&self) -> I32F32 { self.sector.end_bearing() }

    /// Resizes the outer sector.
    ///
    /// # Errors
    /// Returns a [`ZoneGeometryError`] when the radius is not positive or
    /// no longer exceeds the inner cylinder.
    pub fn set_outer_radius(&mut self, radius: f64) -> Result<(), ZoneGeometryError> {
        if radius <= self.cylinder.radius() {
            return Err(ZoneGeometryError::InnerRadiusNotSmaller);
        }
        self.sector.set_radius(radius)
    }

    /// Resizes the inner cylinder.
    ///
    /// # Errors
    /// Returns a [`ZoneGeometryError`] when the radius is not positive or
    /// reaches the outer sector radius.
    pub fn set_inner_radius(&mut self, radius: f64) -> Result<(), ZoneGeometryError> {
        if radius >= self.sector.radius() {
            return Err(ZoneGeometryError::InnerRadiusNotSmaller);
        }
        self.cylinder.set_radius(radius)
    }

    pub fn set_bearings(&mut self, start: I32F32, end: I32F32) {
        self.sector.set_bearings(start, end);
    }

    /// True when the point lies in either component shape.
    pub fn contains(&self, center: &GeoPoint, point: &GeoPoint) -> bool {
        self.cylinder.contains(center, point) || self.sector.contains(center, point)
    }

    /// Signed distance of the union, the smaller of the two component
    /// distances.
    pub fn boundary_distance(&self, center: &GeoPoint, point: &GeoPoint) -> f64 {
        self.cylinder
            .boundary_distance(center, point)
            .min(self.sector.boundary_distance(center, point))
    }
}

use crate::common::geo::GeoPoint;
use crate::zone::{ObservationZone, ZoneGeometryError};
use fixed::types::I32F32;
use strum_macros::Display;

/// Role of a point within the task sequence.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub enum PointRole {
    Start,
    Turn,
    Intermediate,
    Finish,
}

/// A task waypoint paired with its exclusively owned observation zone.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaskPoint {
    waypoint: GeoPoint,
    zone: ObservationZone,
    role: PointRole,
}

impl TaskPoint {
    pub const fn new(waypoint: GeoPoint, zone: ObservationZone, role: PointRole) -> Self {
        Self { waypoint, zone, role }
    }

    pub const fn waypoint(&self) -> &GeoPoint { &self.waypoint }

    pub const fn zone(&self) -> &ObservationZone { &self.zone }

    pub const fn role(&self) -> PointRole { self.role }

    pub fn contains(&self, point: &GeoPoint) -> bool { self.zone.contains(&self.waypoint, point) }

    pub fn boundary_distance(&self, point: &GeoPoint) -> f64 {
        self.zone.boundary_distance(&self.waypoint, point)
    }

    /// Resizes the zone's main radius. Takes effect with the next
    /// processed fix.
    ///
    /// # Errors
    /// Returns a [`ZoneGeometryError`] when the value is rejected.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), ZoneGeometryError> {
        self.zone.set_radius(radius)
    }

    /// Sets explicit sector bearings. Takes effect with the next
    /// processed fix.
    ///
    /// # Errors
    /// Returns a [`ZoneGeometryError`] when the shape has no explicit
    /// bearings.
    pub fn set_sector_bearings(
        &mut self,
        start: I32F32,
        end: I32F32,
    ) -> Result<(), ZoneGeometryError> {
        self.zone.set_bearings(start, end)
    }

    /// Resizes a line gate's half width.
    ///
    /// # Errors
    /// Returns a [`ZoneGeometryError`] when the shape is not a line.
    pub fn set_half_width(&mut self, half_width: f64) -> Result<(), ZoneGeometryError> {
        self.zone.set_half_width(half_width)
    }

    pub(crate) fn set_legs(&mut self, inbound: Option<I32F32>, outbound: Option<I32F32>) {
        self.zone.set_legs(inbound, outbound);
    }
}

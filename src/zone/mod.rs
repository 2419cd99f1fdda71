use crate::common::geo::GeoPoint;
use fixed::types::I32F32;
use strum_macros::Display;

pub(crate) mod crosser;
pub(crate) mod cylinder;
pub(crate) mod keyhole;
pub(crate) mod line;
pub(crate) mod sector;

pub use crosser::{BoundaryCrosser, BoundaryCrossing, ZoneCrossing};
pub use cylinder::CylinderZone;
pub use keyhole::KeyholeZone;
pub use line::LineZone;
pub use sector::{SectorZone, SymmetricSectorZone};

/// Rejection reasons for malformed zone parameters.
///
/// Raised at construction or edit time, never during fix processing.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum ZoneGeometryError {
    NonPositiveRadius,
    NonPositiveWidth,
    InnerRadiusNotSmaller,
    MalformedAngle,
    NotASector,
    NotALine,
}

impl std::error::Error for ZoneGeometryError {}

/// A geometric region around a waypoint that must be entered to register
/// progress on a task leg.
///
/// Each variant carries its shape parameters in its own payload struct.
/// The anchor waypoint is owned by the enclosing task point and passed
/// into the predicates as `center`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ObservationZone {
    Cylinder(CylinderZone),
    Sector(SectorZone),
    SymmetricSector(SymmetricSectorZone),
    Line(LineZone),
    Keyhole(KeyholeZone),
}

impl ObservationZone {
    /// Tests whether a point lies within the zone, boundary inclusive.
    ///
    /// The boundary counts as inside so that a fix sitting exactly on it
    /// produces a single deterministic crossing instead of oscillating.
    pub fn contains(&self, center: &GeoPoint, point: &GeoPoint) -> bool {
        self.boundary_distance(center, point) <= 0.0
    }

    /// Computes the signed distance from the zone boundary in meters,
    /// negative inside. Used by the crosser to bisect the crossing point.
    pub fn boundary_distance(&self, center: &GeoPoint, point: &GeoPoint) -> f64 {
        match self {
            ObservationZone::Cylinder(z) => z.boundary_distance(center, point),
            ObservationZone::Sector(z) => z.boundary_distance(center, point),
            ObservationZone::SymmetricSector(z) => z.boundary_distance(center, point),
            ObservationZone::Line(z) => z.boundary_distance(center, point),
            ObservationZone::Keyhole(z) => z.boundary_distance(center, point),
        }
    }

    /// Resizes the zone's main radius.
    ///
    /// Resizes the cylinder or sector radius, the keyhole's outer sector
    /// radius, or a line gate's half width.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError`] when the new value is not positive.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), ZoneGeometryError> {
        match self {
            ObservationZone::Cylinder(z) => z.set_radius(radius),
            ObservationZone::Sector(z) => z.set_radius(radius),
            ObservationZone::SymmetricSector(z) => z.set_radius(radius),
            ObservationZone::Line(z) => z.set_half_width(radius),
            ObservationZone::Keyhole(z) => z.set_outer_radius(radius),
        }
    }

    /// Sets explicit start/end bearings on a sector-shaped zone.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NotASector`] for shapes without
    /// explicit bearings. Symmetric sectors derive theirs from the legs
    /// and reject explicit bearings as well.
    pub fn set_bearings(&mut self, start: I32F32, end: I32F32) -> Result<(), ZoneGeometryError> {
        match self {
            ObservationZone::Sector(z) => {
                z.set_bearings(start, end);
                Ok(())
            }
            ObservationZone::Keyhole(z) => {
                z.set_bearings(start, end);
                Ok(())
            }
            _ => Err(ZoneGeometryError::NotASector),
        }
    }

    /// Resizes a line gate's half width.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NotALine`] for other shapes.
    pub fn set_half_width(&mut self, half_width: f64) -> Result<(), ZoneGeometryError> {
        match self {
            ObservationZone::Line(z) => z.set_half_width(half_width),
            _ => Err(ZoneGeometryError::NotALine),
        }
    }

    /// Updates geometry derived from the adjacent legs.
    ///
    /// Symmetric sectors realign their bearings to the leg bisector and
    /// line gates take their orientation from the inbound leg. Called
    /// whenever the owning task sequence is linked or re-linked; other
    /// shapes ignore it.
    pub(crate) fn set_legs(&mut self, inbound: Option<I32F32>, outbound: Option<I32F32>) {
        match self {
            ObservationZone::SymmetricSector(z) => z.set_legs(inbound, outbound),
            ObservationZone::Line(z) => z.set_legs(inbound, outbound),
            _ => {}
        }
    }
}

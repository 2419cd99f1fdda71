use super::ZoneGeometryError;
use crate::common::geo::GeoPoint;
use crate::common::math::wrap_bearing;
use fixed::types::I32F32;

const HALF_CIRCLE: I32F32 = I32F32::lit("180.0");

/// A gate line through the waypoint, perpendicular to the leg direction.
///
/// A point is inside while its along-leg offset from the gate line stays
/// within `half_width` meters, so flying through the gate produces an
/// enter followed by an exit. Lateral extent is unbounded; a finite gate
/// length is the host's course rule.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineZone {
    half_width: f64,
    /// Leg direction the gate faces, degrees. Derived at link time.
    bearing: I32F32,
}

impl LineZone {
    /// Creates a new gate with a yet unlinked orientation.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NonPositiveWidth`] when
    /// `half_width <= 0`.
    pub fn new(half_width: f64) -> Result<Self, ZoneGeometryError> {
        if half_width > 0.0 {
            Ok(Self { half_width, bearing: I32F32::ZERO })
        } else {
            Err(ZoneGeometryError::NonPositiveWidth)
        }
    }

    pub fn half_width(&self) -> f64 { self.half_width }

    pub fn bearing(&self) -> I32F32 { self.bearing }

    /// Resizes the gate.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NonPositiveWidth`] when
    /// `half_width <= 0`.
    pub fn set_half_width(&mut self, half_width: f64) -> Result<(), ZoneGeometryError> {
        if half_width > 0.0 {
            self.half_width = half_width;
            Ok(())
        } else {
            Err(ZoneGeometryError::NonPositiveWidth)
        }
    }

    /// Orients the gate across the inbound leg, or across the outbound leg
    /// for a start gate without one.
    pub(crate) fn set_legs(&mut self, inbound: Option<I32F32>, outbound: Option<I32F32>) {
        if let Some(b) = inbound.or(outbound) {
            self.bearing = wrap_bearing(b);
        }
    }

    pub fn contains(&self, center: &GeoPoint, point: &GeoPoint) -> bool {
        self.boundary_distance(center, point) <= 0.0
    }

    /// Signed along-leg offset from the gate strip, negative inside.
    pub fn boundary_distance(&self, center: &GeoPoint, point: &GeoPoint) -> f64 {
        let dist = center.distance_to(point);
        let rel = wrap_bearing(center.bearing_to(point) - self.bearing + HALF_CIRCLE) - HALF_CIRCLE;
        let along = dist * rel.to_num::<f64>().to_radians().cos();
        along.abs() - self.half_width
    }
}

use super::ZoneGeometryError;
use crate::common::geo::GeoPoint;
use crate::common::math::{bearing_excess, wrap_bearing};
use fixed::types::I32F32;

const HALF_CIRCLE: I32F32 = I32F32::lit("180.0");
const FULL_CIRCLE: I32F32 = I32F32::lit("360.0");

/// A sector zone: within a radius of the waypoint and inside the clockwise
/// bearing interval `[start_bearing, end_bearing]` as seen from it.
///
/// Bearings are stored normalized to `[0, 360)`. Equal start and end
/// bearings denote a full circle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectorZone {
    radius: f64,
    start_bearing: I32F32,
    end_bearing: I32F32,
}

impl SectorZone {
    /// Creates a new sector.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NonPositiveRadius`] when `radius <= 0`.
    pub fn new(
        radius: f64,
        start_bearing: I32F32,
        end_bearing: I32F32,
    ) -> Result<Self, ZoneGeometryError> {
        if radius > 0.0 {
            Ok(Self {
                radius,
                start_bearing: wrap_bearing(start_bearing),
                end_bearing: wrap_bearing(end_bearing),
            })
        } else {
            Err(ZoneGeometryError::NonPositiveRadius)
        }
    }

    pub fn radius(&self) -> f64 { self.radius }

    pub fn start_bearing(&self) -> I32F32 { self.start_bearing }

    pub fn end_bearing(&self) -> I32F32 { self.end_bearing }

    /// Resizes the sector.
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

    pub fn set_bearings(&mut self, start: I32F32, end: I32F32) {
        self.start_bearing = wrap_bearing(start);
        self.end_bearing = wrap_bearing(end);
    }

    pub fn contains(&self, center: &GeoPoint, point: &GeoPoint) -> bool {
        self.boundary_distance(center, point) <= 0.0
    }

    /// Signed boundary distance, negative inside.
    ///
    /// Outside the bearing interval the angular offset to the nearer edge
    /// is converted to an arc length at the point's distance, so the value
    /// stays positive and grows smoothly away from the sector.
    pub fn boundary_distance(&self, center: &GeoPoint, point: &GeoPoint) -> f64 {
        let dist = center.distance_to(point);
        let radial = dist - self.radius;
        let excess = bearing_excess(
            center.bearing_to(point),
            self.start_bearing,
            self.end_bearing,
        );
        if excess == I32F32::ZERO {
            radial
        } else {
            let arc = excess.to_num::<f64>().to_radians() * dist;
            radial.max(arc)
        }
    }
}

/// A sector whose bearings follow the bisector of the adjacent legs.
///
/// The effective interval is derived when the owning task sequence is
/// linked. An unlinked symmetric sector behaves as a full cylinder of its
/// radius.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SymmetricSectorZone {
    radius: f64,
    included_angle: I32F32,
    bearings: Option<(I32F32, I32F32)>,
}

impl SymmetricSectorZone {
    /// Creates a new symmetric sector.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::NonPositiveRadius`] when `radius <= 0`
    /// and [`ZoneGeometryError::MalformedAngle`] when the included angle is
    /// outside `(0, 360]` degrees.
    pub fn new(radius: f64, included_angle: I32F32) -> Result<Self, ZoneGeometryError> {
        if radius <= 0.0 {
            return Err(ZoneGeometryError::NonPositiveRadius);
        }
        if included_angle <= I32F32::ZERO || included_angle > FULL_CIRCLE {
            return Err(ZoneGeometryError::MalformedAngle);
        }
        Ok(Self { radius, included_angle, bearings: None })
    }

    pub fn radius(&self) -> f64 { self.radius }

    pub fn included_angle(&self) -> I32F32 { self.included_angle }

    /// The derived bearing interval, once the sequence has been linked.
    pub fn bearings(&self) -> Option<(I32F32, I32F32)> { self.bearings }

    /// Resizes the sector.
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

    /// Changes the included angle, keeping the current bisector.
    ///
    /// # Errors
    /// Returns [`ZoneGeometryError::MalformedAngle`] when the angle is
    /// outside `(0, 360]` degrees.
    pub fn set_included_angle(&mut self, angle: I32F32) -> Result<(), ZoneGeometryError> {
        if angle <= I32F32::ZERO || angle > FULL_CIRCLE {
            return Err(ZoneGeometryError::MalformedAngle);
        }
        if let Some((start, end)) = self.bearings {
            let bisector = wrap_bearing(start + circ_half_span(start, end));
            let half = angle / 2;
            self.bearings = Some((wrap_bearing(bisector - half), wrap_bearing(bisector + half)));
        }
        self.included_angle = angle;
        Ok(())
    }

    /// Realigns the bearing interval to the bisector of the adjacent legs.
    ///
    /// The inbound leg is mirrored so both reference directions point away
    /// from the waypoint. With only one adjacent leg the sector opens
    /// around that direction alone; with none it stays unlinked.
    pub(crate) fn set_legs(&mut self, inbound: Option<I32F32>, outbound: Option<I32F32>) {
        let bisector = match (inbound, outbound) {
            (Some(inb), Some(out)) => {
                let back = wrap_bearing(inb + HALF_CIRCLE);
                Some(wrap_bearing(back + circ_half_span(back, out)))
            }
            (Some(inb), None) => Some(wrap_bearing(inb + HALF_CIRCLE)),
            (None, Some(out)) => Some(out),
            (None, None) => None,
        };
        self.bearings = bisector.map(|b| {
            let half = self.included_angle / 2;
            (wrap_bearing(b - half), wrap_bearing(b + half))
        });
    }

    pub fn contains(&self, center: &GeoPoint, point: &GeoPoint) -> bool {
        self.boundary_distance(center, point) <= 0.0
    }

    pub fn boundary_distance(&self, center: &GeoPoint, point: &GeoPoint) -> f64 {
        let dist = center.distance_to(point);
        let radial = dist - self.radius;
        let Some((start, end)) = self.bearings else {
            return radial;
        };
        let excess = bearing_excess(center.bearing_to(point), start, end);
        if excess == I32F32::ZERO {
            radial
        } else {
            let arc = excess.to_num::<f64>().to_radians() * dist;
            radial.max(arc)
        }
    }
}

/// Half the clockwise span from `start` to `end`.
fn circ_half_span(start: I32F32, end: I32F32) -> I32F32 {
    wrap_bearing(end - start) / 2
}

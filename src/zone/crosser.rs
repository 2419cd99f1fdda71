use super::ObservationZone;
use crate::common::fix::Fix;
use crate::common::geo::GeoPoint;
use crate::common::math::interpolate_time;
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Outcome of comparing zone containment across two successive fixes.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum ZoneCrossing {
    None,
    Entered,
    Exited,
}

/// An estimated boundary crossing between two fixes.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryCrossing {
    t: DateTime<Utc>,
    pos: GeoPoint,
}

impl BoundaryCrossing {
    pub const fn t(&self) -> DateTime<Utc> { self.t }

    pub const fn pos(&self) -> GeoPoint { self.pos }
}

/// Detects zone boundary crossings between successive fixes.
///
/// Both operations are pure functions of their inputs. A transit that
/// enters and leaves the zone entirely between two fixes is not detected;
/// fix cadence is assumed high relative to zone size.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryCrosser {
    bisect_iterations: u32,
}

impl Default for BoundaryCrosser {
    fn default() -> Self { Self { bisect_iterations: 10 } }
}

impl BoundaryCrosser {
    /// Creates a crosser with a custom bisection iteration budget.
    pub const fn new(bisect_iterations: u32) -> Self { Self { bisect_iterations } }

    /// Compares containment at two successive fixes.
    ///
    /// # Returns
    /// - [`ZoneCrossing::Entered`] or [`ZoneCrossing::Exited`] when the
    ///   containment state differs between the fixes.
    /// - [`ZoneCrossing::None`] otherwise, and always for coincident
    ///   positions or a non-positive time delta.
    pub fn check(
        &self,
        zone: &ObservationZone,
        center: &GeoPoint,
        prev: &Fix,
        cur: &Fix,
    ) -> ZoneCrossing {
        if prev.pos() == cur.pos() || cur.t() <= prev.t() {
            return ZoneCrossing::None;
        }
        match (
            zone.contains(center, &prev.pos()),
            zone.contains(center, &cur.pos()),
        ) {
            (false, true) => ZoneCrossing::Entered,
            (true, false) => ZoneCrossing::Exited,
            _ => ZoneCrossing::None,
        }
    }

    /// Estimates where and when the boundary was crossed between two fixes.
    ///
    /// Bisects along the great circle between the fixes, narrowing on the
    /// sign of the zone's boundary distance, then interpolates the fix
    /// timestamps linearly at the found fraction. Expects a fix pair for
    /// which [`check`](Self::check) reported a crossing.
    pub fn refine(
        &self,
        zone: &ObservationZone,
        center: &GeoPoint,
        prev: &Fix,
        cur: &Fix,
    ) -> BoundaryCrossing {
        let prev_inside = zone.boundary_distance(center, &prev.pos()) <= 0.0;
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..self.bisect_iterations {
            let mid = 0.5 * (lo + hi);
            let probe = prev.pos().intermediate_to(&cur.pos(), mid);
            if (zone.boundary_distance(center, &probe) <= 0.0) == prev_inside {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let f = 0.5 * (lo + hi);
        BoundaryCrossing {
            t: interpolate_time(prev.t(), cur.t(), f),
            pos: prev.pos().intermediate_to(&cur.pos(), f),
        }
    }
}

use chrono::{DateTime, TimeDelta, Utc};
use fixed::types::I32F32;
use num_traits::{FromPrimitive, Num};

const FULL_CIRCLE: I32F32 = I32F32::lit("360.0");

/// Normalizes an angular value into the range `[0, 360)`.
///
/// # Arguments
/// - `value`: The angular value in degrees.
///
/// # Returns
/// - The wrapped value of type `T`.
pub fn wrap_bearing<T: Num + FromPrimitive + Copy>(value: T) -> T {
    let full = T::from_u32(360).unwrap();
    ((value % full) + full) % full
}

/// Computes the minimal circular distance between two bearings.
///
/// # Arguments
/// - `a`, `b`: Bearings in degrees.
///
/// # Returns
/// - The smaller of the two arc distances, in `[0, 180]` degrees.
pub fn circular_delta(a: I32F32, b: I32F32) -> I32F32 {
    let diff = wrap_bearing(a - b);
    diff.min(FULL_CIRCLE - diff)
}

/// Tests whether a bearing lies in the clockwise interval from `start` to
/// `end`, both ends inclusive. An interval with `start == end` after
/// normalization covers the full circle.
pub fn bearing_in_range(bearing: I32F32, start: I32F32, end: I32F32) -> bool {
    let b = wrap_bearing(bearing);
    let s = wrap_bearing(start);
    let e = wrap_bearing(end);
    if s == e {
        true
    } else if s < e {
        b >= s && b <= e
    } else {
        b >= s || b <= e
    }
}

/// Computes how far a bearing lies outside the clockwise interval
/// `[start, end]`.
///
/// # Returns
/// - Zero if the bearing is inside the interval, otherwise the minimal
///   angular distance to the nearer interval edge in degrees.
pub fn bearing_excess(bearing: I32F32, start: I32F32, end: I32F32) -> I32F32 {
    if bearing_in_range(bearing, start, end) {
        I32F32::ZERO
    } else {
        circular_delta(bearing, start).min(circular_delta(bearing, end))
    }
}

/// Linearly interpolates between two timestamps.
///
/// # Arguments
/// - `t0`, `t1`: The bracketing timestamps.
/// - `f`: The interpolation fraction, clamped to `[0, 1]`.
///
/// # Returns
/// - The interpolated timestamp at millisecond resolution.
#[allow(clippy::cast_possible_truncation)]
pub fn interpolate_time(t0: DateTime<Utc>, t1: DateTime<Utc>, f: f64) -> DateTime<Utc> {
    let span_ms = (t1 - t0).num_milliseconds();
    let offset = span_ms as f64 * f.clamp(0.0, 1.0);
    t0 + TimeDelta::milliseconds(offset.round() as i64)
}

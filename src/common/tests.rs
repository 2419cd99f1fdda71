use super::geo::GeoPoint;
use super::math::{
    bearing_excess, bearing_in_range, circular_delta, interpolate_time, wrap_bearing,
};
use chrono::{TimeDelta, Utc};
use fixed::types::I32F32;

/// Meters per degree of latitude on the spherical model.
const DEG_LAT_M: f64 = 111_194.93;

fn deg(v: f64) -> I32F32 { I32F32::from_num(v) }

#[test]
fn test_distance_along_meridian() {
    let a = GeoPoint::from_deg(47.0, 9.0);
    let b = GeoPoint::from_deg(48.0, 9.0);
    assert!((a.distance_to(&b) - DEG_LAT_M).abs() < 1.0);
    assert!(a.distance_to(&a) < 1e-6);
}

#[test]
fn test_bearing_cardinal_directions() {
    let a = GeoPoint::from_deg(47.0, 9.0);
    let north = GeoPoint::from_deg(48.0, 9.0);
    let east = GeoPoint::from_deg(0.0, 10.0);
    let origin = GeoPoint::from_deg(0.0, 9.0);
    assert!(a.bearing_to(&north).abs() < deg(0.01));
    assert!((origin.bearing_to(&east) - deg(90.0)).abs() < deg(0.01));
}

#[test]
fn test_offset_round_trip() {
    let p = GeoPoint::from_deg(46.5, 8.0);
    let q = p.offset_by(deg(123.0), 5000.0);
    assert!((p.distance_to(&q) - 5000.0).abs() < 0.5);
    assert!((p.bearing_to(&q) - deg(123.0)).abs() < deg(0.01));
}

#[test]
fn test_intermediate_point() {
    let a = GeoPoint::from_deg(46.5, 8.0);
    let b = a.offset_by(deg(75.0), 30_000.0);
    let mid = a.intermediate_to(&b, 0.5);
    assert!((a.distance_to(&mid) - b.distance_to(&mid)).abs() < 1.0);
    assert!((a.distance_to(&mid) - 15_000.0).abs() < 1.0);
    assert!(a.distance_to(&a.intermediate_to(&b, 0.0)) < 0.01);
    assert_eq!(a.intermediate_to(&a, 0.5), a);
}

#[test]
fn test_wrap_bearing() {
    assert_eq!(wrap_bearing(deg(-90.0)), deg(270.0));
    assert_eq!(wrap_bearing(deg(360.0)), deg(0.0));
    assert!((wrap_bearing(725.0_f64) - 5.0).abs() < 1e-9);
}

#[test]
fn test_bearing_interval() {
    assert!(bearing_in_range(deg(90.0), deg(45.0), deg(135.0)));
    assert!(bearing_in_range(deg(45.0), deg(45.0), deg(135.0)));
    assert!(bearing_in_range(deg(135.0), deg(45.0), deg(135.0)));
    assert!(!bearing_in_range(deg(200.0), deg(45.0), deg(135.0)));
    // interval across north
    assert!(bearing_in_range(deg(350.0), deg(300.0), deg(30.0)));
    assert!(bearing_in_range(deg(10.0), deg(300.0), deg(30.0)));
    assert!(!bearing_in_range(deg(90.0), deg(300.0), deg(30.0)));
    // degenerate interval covers the full circle
    assert!(bearing_in_range(deg(123.0), deg(0.0), deg(360.0)));
}

#[test]
fn test_angular_offsets() {
    assert_eq!(circular_delta(deg(10.0), deg(350.0)), deg(20.0));
    assert_eq!(circular_delta(deg(90.0), deg(270.0)), deg(180.0));
    assert_eq!(bearing_excess(deg(40.0), deg(300.0), deg(30.0)), deg(10.0));
    assert_eq!(bearing_excess(deg(10.0), deg(300.0), deg(30.0)), deg(0.0));
}

#[test]
fn test_interpolate_time() {
    let t0 = Utc::now();
    let t1 = t0 + TimeDelta::seconds(10);
    assert_eq!(interpolate_time(t0, t1, 0.5), t0 + TimeDelta::seconds(5));
    assert_eq!(interpolate_time(t0, t1, 0.0), t0);
    assert_eq!(interpolate_time(t0, t1, 2.0), t1);
}

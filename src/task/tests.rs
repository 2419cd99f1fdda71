use super::event::TransitionKind;
use super::point::{PointRole, TaskPoint};
use super::progress::{FixError, TaskProgress, TaskStatus};
use super::rules::TaskRules;
use super::{Task, TaskFormatError};
use crate::common::fix::Fix;
use crate::common::geo::GeoPoint;
use crate::info;
use crate::zone::{CylinderZone, LineZone, ObservationZone, SectorZone, SymmetricSectorZone};
use chrono::{DateTime, TimeDelta, Utc};
use fixed::types::I32F32;
use rand::Rng;

fn deg(v: f64) -> I32F32 { I32F32::from_num(v) }

fn wp_a() -> GeoPoint { GeoPoint::from_deg(46.5, 8.0) }

fn wp_b() -> GeoPoint { wp_a().offset_by(deg(90.0), 20_000.0) }

fn start_point() -> TaskPoint {
    TaskPoint::new(
        wp_a(),
        ObservationZone::Cylinder(CylinderZone::new(3000.0).unwrap()),
        PointRole::Start,
    )
}

fn turn_point() -> TaskPoint {
    TaskPoint::new(
        wp_b(),
        ObservationZone::Sector(SectorZone::new(5000.0, deg(0.0), deg(360.0)).unwrap()),
        PointRole::Turn,
    )
}

fn finish_point() -> TaskPoint {
    TaskPoint::new(
        wp_a(),
        ObservationZone::Line(LineZone::new(1000.0).unwrap()),
        PointRole::Finish,
    )
}

/// Start cylinder at A, full-circle turn sector at B, finish line back at A.
fn demo_task() -> Task {
    Task::new(vec![start_point(), turn_point(), finish_point()]).unwrap()
}

fn fix(t0: DateTime<Utc>, secs: i64, pos: GeoPoint) -> Fix {
    Fix::new(t0 + TimeDelta::seconds(secs), pos, 1200.0)
}

#[test]
fn test_course_end_to_end() {
    let mut progress = TaskProgress::new(demo_task(), TaskRules::default());
    let t0 = Utc::now();
    info!("Running end-to-end course test");

    let ev = progress.process_fix(fix(t0, 0, wp_a().offset_by(deg(270.0), 10_000.0))).unwrap();
    assert!(ev.is_none());
    assert_eq!(progress.status(), TaskStatus::NotStarted);
    assert_eq!(progress.current_leg(), 0);

    let started = progress.process_fix(fix(t0, 10, wp_a())).unwrap().unwrap();
    assert_eq!(started.kind(), TransitionKind::Started);
    assert_eq!(progress.status(), TaskStatus::Started);
    assert_eq!(progress.current_leg(), 0);
    let start_t = progress.start_time().unwrap();
    assert!(start_t > t0 && start_t < t0 + TimeDelta::seconds(10));

    let advanced = progress.process_fix(fix(t0, 20, wp_b())).unwrap().unwrap();
    assert_eq!(advanced.kind(), TransitionKind::Advanced);
    assert_eq!(advanced.point_index(), 1);
    assert_eq!(progress.status(), TaskStatus::InProgress);
    assert_eq!(progress.current_leg(), 1);

    // approach the finish gate from the east, still outside the strip
    let ev = progress.process_fix(fix(t0, 30, wp_a().offset_by(deg(90.0), 5000.0))).unwrap();
    assert!(ev.is_none());

    let finished = progress.process_fix(fix(t0, 40, wp_a().offset_by(deg(270.0), 500.0)));
    let finished = finished.unwrap().unwrap();
    assert_eq!(finished.kind(), TransitionKind::Finished);
    assert_eq!(progress.status(), TaskStatus::Finished);
    // gate edge sits 4000m into the 5500m step towards the line
    let expected = t0 + TimeDelta::seconds(30) + TimeDelta::milliseconds(7273);
    let finish_t = progress.finish_time().unwrap();
    assert!((finish_t - expected).num_milliseconds().abs() < 300);
    assert_eq!(finished.t(), finish_t);

    let kinds: Vec<TransitionKind> = progress.history().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![TransitionKind::Started, TransitionKind::Advanced, TransitionKind::Finished]
    );
}

#[test]
fn test_out_of_order_fix_is_rejected() {
    let mut progress = TaskProgress::new(demo_task(), TaskRules::default());
    let t0 = Utc::now();
    progress.process_fix(fix(t0, 0, wp_a().offset_by(deg(270.0), 10_000.0))).unwrap();
    progress.process_fix(fix(t0, 10, wp_a())).unwrap();
    let leg_before = progress.current_leg();
    let status_before = progress.status();
    let history_before = progress.history().len();

    assert_eq!(progress.process_fix(fix(t0, 10, wp_b())), Err(FixError::OutOfOrder));
    assert_eq!(progress.process_fix(fix(t0, 5, wp_b())), Err(FixError::OutOfOrder));
    assert_eq!(progress.current_leg(), leg_before);
    assert_eq!(progress.status(), status_before);
    assert_eq!(progress.history().len(), history_before);
}

#[test]
fn test_start_reentry_keeps_last_start() {
    // four points so the target zone stays far from A after the turn
    let far_turn = TaskPoint::new(
        wp_b().offset_by(deg(0.0), 15_000.0),
        ObservationZone::Cylinder(CylinderZone::new(500.0).unwrap()),
        PointRole::Turn,
    );
    let task = Task::new(vec![start_point(), turn_point(), far_turn, finish_point()]).unwrap();
    let mut progress = TaskProgress::new(task, TaskRules::default());
    let t0 = Utc::now();
    let outside = wp_a().offset_by(deg(270.0), 10_000.0);
    progress.process_fix(fix(t0, 0, outside)).unwrap();
    progress.process_fix(fix(t0, 10, wp_a())).unwrap();
    let first_start = progress.start_time().unwrap();

    progress.process_fix(fix(t0, 20, outside)).unwrap();
    let restarted = progress.process_fix(fix(t0, 30, wp_a())).unwrap().unwrap();
    assert_eq!(restarted.kind(), TransitionKind::Started);
    assert_eq!(progress.status(), TaskStatus::Started);
    let second_start = progress.start_time().unwrap();
    assert!(second_start > first_start);

    // once a turn is reached the start can no longer be re-armed
    progress.process_fix(fix(t0, 40, wp_b())).unwrap();
    progress.process_fix(fix(t0, 50, outside)).unwrap();
    let ev = progress.process_fix(fix(t0, 60, wp_a())).unwrap();
    assert!(ev.is_none());
    assert_eq!(progress.start_time().unwrap(), second_start);
    assert_eq!(progress.current_leg(), 1);
}

#[test]
fn test_start_altitude_rule_denies_high_start() {
    let rules = TaskRules::new(Some(1500.0), None, None);
    let mut progress = TaskProgress::new(demo_task(), rules);
    let t0 = Utc::now();
    let outside = wp_a().offset_by(deg(270.0), 10_000.0);

    progress.process_fix(Fix::new(t0, outside, 2000.0)).unwrap();
    let denied = progress
        .process_fix(Fix::new(t0 + TimeDelta::seconds(10), wp_a(), 2000.0))
        .unwrap();
    assert!(denied.is_none());
    assert_eq!(progress.status(), TaskStatus::NotStarted);
    assert!(progress.start_time().is_none());

    progress.process_fix(Fix::new(t0 + TimeDelta::seconds(20), outside, 1400.0)).unwrap();
    let started = progress
        .process_fix(Fix::new(t0 + TimeDelta::seconds(30), wp_a(), 1400.0))
        .unwrap();
    assert!(started.is_some());
    assert_eq!(progress.status(), TaskStatus::Started);
}

#[test]
fn test_min_task_time_denies_early_finish() {
    let rules = TaskRules::new(None, None, Some(TimeDelta::hours(1)));
    let mut progress = TaskProgress::new(demo_task(), rules);
    let t0 = Utc::now();
    progress.process_fix(fix(t0, 0, wp_a().offset_by(deg(270.0), 10_000.0))).unwrap();
    progress.process_fix(fix(t0, 10, wp_a())).unwrap();
    progress.process_fix(fix(t0, 20, wp_b())).unwrap();
    progress.process_fix(fix(t0, 30, wp_a().offset_by(deg(90.0), 5000.0))).unwrap();
    let denied = progress.process_fix(fix(t0, 40, wp_a().offset_by(deg(270.0), 500.0))).unwrap();
    assert!(denied.is_none());
    assert_eq!(progress.status(), TaskStatus::InProgress);
    assert!(progress.finish_time().is_none());
}

#[test]
fn test_reset_clears_all_progress_state() {
    let mut progress = TaskProgress::new(demo_task(), TaskRules::default());
    let t0 = Utc::now();
    progress.process_fix(fix(t0, 0, wp_a().offset_by(deg(270.0), 10_000.0))).unwrap();
    progress.process_fix(fix(t0, 10, wp_a())).unwrap();
    progress.process_fix(fix(t0, 20, wp_b())).unwrap();
    assert!(!progress.history().is_empty());

    progress.reset();
    assert_eq!(progress.status(), TaskStatus::NotStarted);
    assert_eq!(progress.current_leg(), 0);
    assert!(progress.history().is_empty());
    assert!(progress.start_time().is_none());

    // the identical fix sequence runs again as on a fresh task
    progress.process_fix(fix(t0, 0, wp_a().offset_by(deg(270.0), 10_000.0))).unwrap();
    let started = progress.process_fix(fix(t0, 10, wp_a())).unwrap().unwrap();
    assert_eq!(started.kind(), TransitionKind::Started);
    assert_eq!(progress.status(), TaskStatus::Started);
}

#[test]
fn test_fail_is_terminal_until_reset() {
    let mut progress = TaskProgress::new(demo_task(), TaskRules::default());
    let t0 = Utc::now();
    progress.process_fix(fix(t0, 0, wp_a().offset_by(deg(270.0), 10_000.0))).unwrap();
    progress.process_fix(fix(t0, 10, wp_a())).unwrap();

    progress.fail("airspace violation");
    assert_eq!(progress.status(), TaskStatus::Failed);
    assert_eq!(progress.history().last().unwrap().kind(), TransitionKind::Failed);

    let ev = progress.process_fix(fix(t0, 20, wp_b())).unwrap();
    assert!(ev.is_none());
    assert_eq!(progress.status(), TaskStatus::Failed);

    progress.reset();
    assert_eq!(progress.status(), TaskStatus::NotStarted);
}

#[test]
fn test_leg_index_is_monotonic() {
    let mut progress = TaskProgress::new(demo_task(), TaskRules::default());
    let t0 = Utc::now();
    let mut rng = rand::rng();
    let mut last_leg = progress.current_leg();
    for i in 0..300 {
        let pos = wp_a().offset_by(
            deg(rng.random_range(0.0..360.0)),
            rng.random_range(0.0..25_000.0),
        );
        progress.process_fix(fix(t0, i, pos)).unwrap();
        assert!(progress.current_leg() >= last_leg);
        last_leg = progress.current_leg();
    }
}

#[test]
fn test_task_format_validation() {
    assert_eq!(Task::new(vec![start_point()]), Err(TaskFormatError::TooFewPoints));
    assert_eq!(
        Task::new(vec![turn_point(), finish_point()]),
        Err(TaskFormatError::FirstNotStart)
    );
    assert_eq!(
        Task::new(vec![start_point(), turn_point()]),
        Err(TaskFormatError::LastNotFinish)
    );
    assert_eq!(
        Task::new(vec![start_point(), finish_point(), finish_point()]),
        Err(TaskFormatError::MisplacedRole)
    );
    assert!(Task::new(vec![start_point(), finish_point()]).is_ok());
}

#[test]
fn test_legs_are_derived_pairwise() {
    let task = demo_task();
    let legs: Vec<_> = task.legs().collect();
    assert_eq!(legs.len(), 2);
    assert!((legs[0].length() - 20_000.0).abs() < 1.0);
    assert!((legs[0].bearing() - deg(90.0)).abs() < deg(0.1));
}

#[test]
fn test_removal_relinks_symmetric_sector() {
    let sym = TaskPoint::new(
        wp_b(),
        ObservationZone::SymmetricSector(SymmetricSectorZone::new(5000.0, deg(90.0)).unwrap()),
        PointRole::Turn,
    );
    let wp_c = wp_b().offset_by(deg(0.0), 15_000.0);
    let extra_turn = TaskPoint::new(
        wp_c,
        ObservationZone::Cylinder(CylinderZone::new(500.0).unwrap()),
        PointRole::Turn,
    );
    let mut task =
        Task::new(vec![start_point(), sym, extra_turn, finish_point()]).unwrap();

    let bearings = |task: &Task| match task.point(1).unwrap().zone() {
        ObservationZone::SymmetricSector(z) => z.bearings().unwrap(),
        _ => unreachable!(),
    };
    // bisector between the reversed inbound leg (~270) and the northbound leg
    let (start_b, end_b) = bearings(&task);
    assert!((start_b - deg(270.0)).abs() < deg(1.0));
    assert!((end_b - deg(0.0)).abs() < deg(1.0) || (end_b - deg(360.0)).abs() < deg(1.0));

    task.remove_point(2).unwrap();
    // with the course reversing at B the sector now opens due west
    let (start_b, end_b) = bearings(&task);
    assert!((start_b - deg(225.0)).abs() < deg(1.0));
    assert!((end_b - deg(315.0)).abs() < deg(1.0));
}

#[test]
fn test_point_edit_validation() {
    let mut task = demo_task();
    let point = task.point_mut(1).unwrap();
    assert!(point.set_radius(6000.0).is_ok());
    assert!(point.set_radius(0.0).is_err());
    assert!(point.set_sector_bearings(deg(10.0), deg(100.0)).is_ok());
    let start = task.point_mut(0).unwrap();
    assert!(start.set_sector_bearings(deg(10.0), deg(100.0)).is_err());
    assert!(start.set_half_width(200.0).is_err());
}

#[test]
fn test_insert_point_positions() {
    let mut task = demo_task();
    let extra = TaskPoint::new(
        wp_a().offset_by(deg(45.0), 10_000.0),
        ObservationZone::Cylinder(CylinderZone::new(500.0).unwrap()),
        PointRole::Turn,
    );
    assert_eq!(task.insert_point(0, extra.clone()), Err(TaskFormatError::FirstNotStart));
    assert_eq!(task.insert_point(3, extra.clone()), Err(TaskFormatError::LastNotFinish));
    assert_eq!(task.insert_point(1, start_point()), Err(TaskFormatError::MisplacedRole));
    assert!(task.insert_point(2, extra).is_ok());
    assert_eq!(task.len(), 4);
    assert_eq!(task.legs().count(), 3);
}

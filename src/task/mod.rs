use fixed::types::I32F32;
use itertools::Itertools;
use strum_macros::Display;

pub(crate) mod event;
pub(crate) mod point;
pub(crate) mod progress;
pub(crate) mod rules;
#[cfg(test)]
mod tests;

pub use event::{TransitionEvent, TransitionKind};
pub use point::{PointRole, TaskPoint};
pub use progress::{FixError, TaskProgress, TaskStatus};
pub use rules::{TaskRuleViolation, TaskRules};

/// Rejection reasons for a malformed task point sequence.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum TaskFormatError {
    TooFewPoints,
    FirstNotStart,
    LastNotFinish,
    MisplacedRole,
    IndexOutOfBounds,
}

impl std::error::Error for TaskFormatError {}

/// An ordered task course: a start point, optional interior points and a
/// finish point.
///
/// Legs are derived from consecutive point pairs and never stored.
/// Whenever the sequence changes, geometry derived from the legs
/// (symmetric sector bearings, line gate orientations) is re-linked.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Task {
    points: Vec<TaskPoint>,
}

impl Task {
    /// Builds a task from an ordered point sequence and links the derived
    /// geometry.
    ///
    /// # Errors
    /// Returns a [`TaskFormatError`] unless the sequence has at least two
    /// points, starts with a [`PointRole::Start`], ends with a
    /// [`PointRole::Finish`] and carries only turn or intermediate points
    /// in between.
    pub fn new(points: Vec<TaskPoint>) -> Result<Self, TaskFormatError> {
        Self::validate(&points)?;
        let mut task = Self { points };
        task.relink();
        Ok(task)
    }

    fn validate(points: &[TaskPoint]) -> Result<(), TaskFormatError> {
        if points.len() < 2 {
            return Err(TaskFormatError::TooFewPoints);
        }
        if points[0].role() != PointRole::Start {
            return Err(TaskFormatError::FirstNotStart);
        }
        if points[points.len() - 1].role() != PointRole::Finish {
            return Err(TaskFormatError::LastNotFinish);
        }
        let interior_ok = points[1..points.len() - 1]
            .iter()
            .all(|p| matches!(p.role(), PointRole::Turn | PointRole::Intermediate));
        if interior_ok {
            Ok(())
        } else {
            Err(TaskFormatError::MisplacedRole)
        }
    }

    pub fn points(&self) -> &[TaskPoint] { &self.points }

    pub fn point(&self, index: usize) -> Option<&TaskPoint> { self.points.get(index) }

    /// Mutable access for zone edits through the validated
    /// [`TaskPoint`] methods.
    pub fn point_mut(&mut self, index: usize) -> Option<&mut TaskPoint> {
        self.points.get_mut(index)
    }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// The derived leg sequence, one leg per consecutive point pair.
    pub fn legs(&self) -> impl Iterator<Item = TaskLeg<'_>> + '_ {
        self.points.iter().tuple_windows().map(|(start, end)| TaskLeg { start, end })
    }

    /// Inserts an interior point and re-links the derived geometry.
    ///
    /// # Errors
    /// Returns a [`TaskFormatError`] when the index would displace the
    /// start or finish or the point is not an interior role.
    pub fn insert_point(&mut self, index: usize, point: TaskPoint) -> Result<(), TaskFormatError> {
        if index == 0 {
            return Err(TaskFormatError::FirstNotStart);
        }
        if index > self.points.len() - 1 {
            return Err(TaskFormatError::LastNotFinish);
        }
        if !matches!(point.role(), PointRole::Turn | PointRole::Intermediate) {
            return Err(TaskFormatError::MisplacedRole);
        }
        self.points.insert(index, point);
        self.relink();
        Ok(())
    }

    /// Removes an interior point, re-linking the adjacent legs.
    ///
    /// # Errors
    /// Returns a [`TaskFormatError`] when the index is out of bounds or
    /// names the start or finish point.
    pub fn remove_point(&mut self, index: usize) -> Result<TaskPoint, TaskFormatError> {
        if index >= self.points.len() {
            return Err(TaskFormatError::IndexOutOfBounds);
        }
        if index == 0 {
            return Err(TaskFormatError::FirstNotStart);
        }
        if index == self.points.len() - 1 {
            return Err(TaskFormatError::LastNotFinish);
        }
        let removed = self.points.remove(index);
        self.relink();
        Ok(removed)
    }

    /// Recomputes leg-derived geometry on every point.
    fn relink(&mut self) {
        let leg_bearings: Vec<I32F32> = self
            .points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.waypoint().bearing_to(b.waypoint()))
            .collect();
        for (i, point) in self.points.iter_mut().enumerate() {
            let inbound = if i > 0 { Some(leg_bearings[i - 1]) } else { None };
            let outbound = leg_bearings.get(i).copied();
            point.set_legs(inbound, outbound);
        }
    }
}

/// A course segment between two consecutive task points.
#[derive(Debug, Clone, Copy)]
pub struct TaskLeg<'a> {
    start: &'a TaskPoint,
    end: &'a TaskPoint,
}

impl TaskLeg<'_> {
    pub const fn start(&self) -> &TaskPoint { self.start }

    pub const fn end(&self) -> &TaskPoint { self.end }

    /// Leg length in meters.
    pub fn length(&self) -> f64 { self.start.waypoint().distance_to(self.end.waypoint()) }

    /// Initial bearing from the leg start, degrees in `[0, 360)`.
    pub fn bearing(&self) -> I32F32 { self.start.waypoint().bearing_to(self.end.waypoint()) }
}

impl std::fmt::Display for TaskLeg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({:.0}m at {:.0})",
            self.start.waypoint(),
            self.end.waypoint(),
            self.length(),
            self.bearing()
        )
    }
}

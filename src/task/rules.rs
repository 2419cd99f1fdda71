use crate::common::fix::Fix;
use chrono::{DateTime, TimeDelta, Utc};
use strum_macros::Display;

/// A denied start or finish transition.
///
/// Denials never fail the task; the transition simply does not happen and
/// the state stays unchanged until a compliant crossing occurs.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum TaskRuleViolation {
    StartAltitudeExceeded,
    FinishBelowMinimum,
    FinishUnderMinTime,
}

impl std::error::Error for TaskRuleViolation {}

/// Competition rules checked at the start and finish transitions.
///
/// All limits are optional; the default rule set allows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskRules {
    max_start_altitude: Option<f64>,
    min_finish_altitude: Option<f64>,
    min_task_time: Option<TimeDelta>,
}

impl TaskRules {
    pub const fn new(
        max_start_altitude: Option<f64>,
        min_finish_altitude: Option<f64>,
        min_task_time: Option<TimeDelta>,
    ) -> Self {
        Self { max_start_altitude, min_finish_altitude, min_task_time }
    }

    pub const fn max_start_altitude(&self) -> Option<f64> { self.max_start_altitude }

    pub const fn min_finish_altitude(&self) -> Option<f64> { self.min_finish_altitude }

    pub const fn min_task_time(&self) -> Option<TimeDelta> { self.min_task_time }

    /// Validates a start crossing.
    ///
    /// # Errors
    /// [`TaskRuleViolation::StartAltitudeExceeded`] when the fix is above
    /// the start altitude cap.
    pub fn check_start(&self, fix: &Fix) -> Result<(), TaskRuleViolation> {
        match self.max_start_altitude {
            Some(limit) if fix.alt() > limit => Err(TaskRuleViolation::StartAltitudeExceeded),
            _ => Ok(()),
        }
    }

    /// Validates a finish crossing against the altitude floor and the
    /// minimum task time counted from the recorded start.
    ///
    /// # Errors
    /// The first violated rule.
    pub fn check_finish(
        &self,
        fix: &Fix,
        crossing_t: DateTime<Utc>,
        start_t: Option<DateTime<Utc>>,
    ) -> Result<(), TaskRuleViolation> {
        if let Some(limit) = self.min_finish_altitude {
            if fix.alt() < limit {
                return Err(TaskRuleViolation::FinishBelowMinimum);
            }
        }
        if let (Some(min_time), Some(start)) = (self.min_task_time, start_t) {
            if crossing_t - start < min_time {
                return Err(TaskRuleViolation::FinishUnderMinTime);
            }
        }
        Ok(())
    }
}

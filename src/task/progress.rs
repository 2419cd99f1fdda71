use super::Task;
use super::event::{TransitionEvent, TransitionKind};
use super::point::PointRole;
use super::rules::TaskRules;
use crate::common::fix::Fix;
use crate::zone::{BoundaryCrosser, BoundaryCrossing, ZoneCrossing};
use crate::{error, event, info, warn};
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Overall task state.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum TaskStatus {
    NotStarted,
    Started,
    InProgress,
    Finished,
    Failed,
}

/// Rejection of a fix that does not extend the processed stream.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum FixError {
    OutOfOrder,
}

impl std::error::Error for FixError {}

/// Tracks an aircraft's progress through a task course.
///
/// Consumes a strictly time-ordered fix stream and advances through the
/// task points as their zones are entered. The host reads the current
/// leg, status and history; the fix-processing path is the only mutator
/// of the progress state. Cross-thread access must be synchronized
/// externally.
#[derive(Debug)]
pub struct TaskProgress {
    task: Task,
    rules: TaskRules,
    crosser: BoundaryCrosser,
    status: TaskStatus,
    /// Index of the next task point to enter. Never decreases.
    target: usize,
    crossing_times: Vec<Option<DateTime<Utc>>>,
    history: Vec<TransitionEvent>,
    last_fix: Option<Fix>,
}

impl TaskProgress {
    pub fn new(task: Task, rules: TaskRules) -> Self {
        let slots = task.len();
        Self {
            task,
            rules,
            crosser: BoundaryCrosser::default(),
            status: TaskStatus::NotStarted,
            target: 0,
            crossing_times: vec![None; slots],
            history: Vec::new(),
            last_fix: None,
        }
    }

    pub fn status(&self) -> TaskStatus { self.status }

    /// Index of the leg currently being flown, 0 while waiting for the
    /// start.
    pub fn current_leg(&self) -> usize { self.target.saturating_sub(1) }

    /// Read-only view of the append-only transition history.
    pub fn history(&self) -> &[TransitionEvent] { &self.history }

    /// The recorded crossing time of a task point, if it was crossed.
    pub fn crossing_time(&self, index: usize) -> Option<DateTime<Utc>> {
        self.crossing_times.get(index).copied().flatten()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> { self.crossing_time(0) }

    pub fn finish_time(&self) -> Option<DateTime<Utc>> {
        self.crossing_time(self.task.len() - 1)
    }

    pub fn task(&self) -> &Task { &self.task }

    /// Mutable course access for zone edits; visible to the next
    /// processed fix.
    pub fn task_mut(&mut self) -> &mut Task { &mut self.task }

    pub fn rules(&self) -> &TaskRules { &self.rules }

    pub fn set_rules(&mut self, rules: TaskRules) { self.rules = rules; }

    /// Feeds the next fix into the state machine.
    ///
    /// # Returns
    /// - `Ok(Some(event))` when the fix completed a task transition.
    /// - `Ok(None)` when nothing changed.
    ///
    /// # Errors
    /// [`FixError::OutOfOrder`] when the fix timestamp does not exceed the
    /// last processed one. The fix is dropped and the state unchanged.
    pub fn process_fix(&mut self, fix: Fix) -> Result<Option<TransitionEvent>, FixError> {
        if let Some(last) = self.last_fix {
            if fix.t() <= last.t() {
                return Err(FixError::OutOfOrder);
            }
        }
        let prev = self.last_fix.replace(fix);
        let Some(prev) = prev else {
            return Ok(None);
        };
        let transition = match self.status {
            TaskStatus::NotStarted => self.try_start(&prev, &fix),
            TaskStatus::Started | TaskStatus::InProgress => {
                self.try_advance(&prev, &fix).or_else(|| self.try_restart(&prev, &fix))
            }
            TaskStatus::Finished | TaskStatus::Failed => None,
        };
        if let Some(ev) = transition {
            self.history.push(ev);
        }
        Ok(transition)
    }

    /// Marks the task as irrecoverably failed. The host declares this for
    /// rule violations the engine cannot observe itself.
    pub fn fail(&mut self, reason: &str) {
        if self.status == TaskStatus::Failed {
            return;
        }
        error!("Task failed: {reason}");
        self.status = TaskStatus::Failed;
        if let Some(fix) = self.last_fix {
            self.history.push(TransitionEvent::new(
                self.target,
                TransitionKind::Failed,
                fix.t(),
                fix,
            ));
        }
    }

    /// Returns to a fresh NotStarted state, clearing recorded times and
    /// history. The course and zone configuration stay untouched.
    pub fn reset(&mut self) {
        info!("Task reset");
        self.status = TaskStatus::NotStarted;
        self.target = 0;
        self.crossing_times = vec![None; self.task.len()];
        self.history.clear();
        self.last_fix = None;
    }

    /// Checks for a rule-compliant entry into the start zone and refines
    /// its crossing time.
    fn start_crossing(&self, prev: &Fix, fix: &Fix) -> Option<BoundaryCrossing> {
        let start = &self.task.points()[0];
        if self.crosser.check(start.zone(), start.waypoint(), prev, fix) != ZoneCrossing::Entered {
            return None;
        }
        if let Err(violation) = self.rules.check_start(fix) {
            warn!("Start denied: {violation}");
            return None;
        }
        Some(self.crosser.refine(start.zone(), start.waypoint(), prev, fix))
    }

    fn try_start(&mut self, prev: &Fix, fix: &Fix) -> Option<TransitionEvent> {
        let crossing = self.start_crossing(prev, fix)?;
        self.crossing_times[0] = Some(crossing.t());
        self.status = TaskStatus::Started;
        self.target = 1;
        info!("Task started at {} near {}", crossing.t().format("%H:%M:%S"), crossing.pos());
        Some(TransitionEvent::new(0, TransitionKind::Started, crossing.t(), *fix))
    }

    /// Re-registers a start crossing while no turn has been reached yet.
    /// The last valid start counts; earlier ones are overwritten.
    fn try_restart(&mut self, prev: &Fix, fix: &Fix) -> Option<TransitionEvent> {
        if self.target != 1 {
            return None;
        }
        let crossing = self.start_crossing(prev, fix)?;
        self.crossing_times[0] = Some(crossing.t());
        info!("Start re-crossed at {}", crossing.t().format("%H:%M:%S"));
        Some(TransitionEvent::new(0, TransitionKind::Started, crossing.t(), *fix))
    }

    fn try_advance(&mut self, prev: &Fix, fix: &Fix) -> Option<TransitionEvent> {
        let target = self.target;
        if target >= self.task.len() {
            return None;
        }
        let role = {
            let tp = &self.task.points()[target];
            if self.crosser.check(tp.zone(), tp.waypoint(), prev, fix) != ZoneCrossing::Entered {
                return None;
            }
            tp.role()
        };
        event!("Fix {fix} entered zone of point {target}");
        if role == PointRole::Finish {
            let crossing = {
                let tp = &self.task.points()[target];
                self.crosser.refine(tp.zone(), tp.waypoint(), prev, fix)
            };
            if let Err(violation) =
                self.rules.check_finish(fix, crossing.t(), self.crossing_times[0])
            {
                warn!("Finish denied: {violation}");
                return None;
            }
            self.crossing_times[target] = Some(crossing.t());
            self.status = TaskStatus::Finished;
            info!("Task finished at {}", crossing.t().format("%H:%M:%S"));
            Some(TransitionEvent::new(target, TransitionKind::Finished, crossing.t(), *fix))
        } else {
            self.crossing_times[target] = Some(fix.t());
            self.target = target + 1;
            self.status = TaskStatus::InProgress;
            info!("Point {target} crossed, now on leg {}", self.current_leg());
            Some(TransitionEvent::new(target, TransitionKind::Advanced, fix.t(), *fix))
        }
    }
}

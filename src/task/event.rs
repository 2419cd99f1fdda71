use crate::common::fix::Fix;
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Kind of a recorded task transition.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub enum TransitionKind {
    Started,
    Advanced,
    Finished,
    Failed,
}

/// An immutable record of a single task transition.
///
/// Appended to the progress history for post-flight analysis; past
/// entries are never mutated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionEvent {
    point_index: usize,
    kind: TransitionKind,
    t: DateTime<Utc>,
    fix: Fix,
}

impl TransitionEvent {
    pub(crate) const fn new(
        point_index: usize,
        kind: TransitionKind,
        t: DateTime<Utc>,
        fix: Fix,
    ) -> Self {
        Self { point_index, kind, t, fix }
    }

    /// Index of the task point the transition refers to.
    pub const fn point_index(&self) -> usize { self.point_index }

    pub const fn kind(&self) -> TransitionKind { self.kind }

    /// The crossing timestamp, refined where the transition warranted it.
    pub const fn t(&self) -> DateTime<Utc> { self.t }

    /// The fix that triggered the transition.
    pub const fn fix(&self) -> Fix { self.fix }
}

impl std::fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} point {} at {}",
            self.kind,
            self.point_index,
            self.t.format("%H:%M:%S")
        )
    }
}

//! Flight task engine for glide computers.
//!
//! Tracks an aircraft's progress through a competition task defined by
//! observation zones around waypoints. The host application feeds a
//! time-ordered stream of position fixes into [`TaskProgress`] and reads
//! back the current leg, status and transition history for display.
//! Rendering, input handling and device I/O live outside this crate.
#![allow(clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

pub mod common;
mod logger;
pub mod task;
pub mod zone;

pub use common::{Fix, GeoPoint};
pub use task::{
    FixError, PointRole, Task, TaskFormatError, TaskPoint, TaskProgress, TaskRuleViolation,
    TaskRules, TaskStatus, TransitionEvent, TransitionKind,
};
pub use zone::{BoundaryCrosser, ObservationZone, ZoneCrossing, ZoneGeometryError};

//! # PlotArm Planner
//!
//! Walks the waypoints of a path, keeps track of the pen, and turns every
//! waypoint into the device commands for it: a pen actuation when the pen
//! intent changes, then exactly one motion command with the step deltas of
//! both joints.

pub mod command;
pub mod pen;
pub mod planner;

pub use command::{MotionCommand, PlannedMove};
pub use pen::{PenAction, PenActuation, PenProtocol};
pub use planner::{MotionPlanner, PlanSummary, PlannedMoves};

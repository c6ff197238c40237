//! Device motion commands

use crate::pen::PenAction;
use plotarm_core::Waypoint;
use plotarm_kinematics::ArmState;
use std::fmt;

/// Relative move of both joints, formatted as `{shoulder}b{elbow}agw`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionCommand {
    /// Shoulder (A) steps
    pub shoulder_delta: i64,
    /// Elbow (B) steps
    pub elbow_delta: i64,
}

impl MotionCommand {
    /// Create a motion command
    pub fn new(shoulder_delta: i64, elbow_delta: i64) -> Self {
        Self {
            shoulder_delta,
            elbow_delta,
        }
    }

    /// Whether the command moves neither joint
    pub fn is_idle(&self) -> bool {
        self.shoulder_delta == 0 && self.elbow_delta == 0
    }
}

impl From<ArmState> for MotionCommand {
    fn from(state: ArmState) -> Self {
        let (shoulder_delta, elbow_delta) = state.deltas();
        Self::new(shoulder_delta, elbow_delta)
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}b{}agw", self.shoulder_delta, self.elbow_delta)
    }
}

/// Everything the device needs for one waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedMove {
    /// The waypoint being reached
    pub waypoint: Waypoint,
    /// Pen transition to perform before moving, if the pen intent changed
    pub pen: Option<PenAction>,
    /// Joint motion to the waypoint
    pub motion: MotionCommand,
    /// Joint bookkeeping after the move
    pub state: ArmState,
}

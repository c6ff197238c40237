//! Pen actuation protocol
//!
//! Raising or lowering the pen is a device-specific command string followed
//! by a pause while the servo settles and a release command. The literals are
//! configurable; the defaults match the stock arm controller firmware.

use plotarm_core::{PenState, Result, Transport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Pen transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenAction {
    /// Lower the pen onto the surface
    Drop,
    /// Lift the pen off the surface
    Lift,
}

impl PenAction {
    /// Pen state after the action completes
    pub fn resulting_state(self) -> PenState {
        match self {
            PenAction::Drop => PenState::Down,
            PenAction::Lift => PenState::Up,
        }
    }
}

impl fmt::Display for PenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenAction::Drop => write!(f, "drop"),
            PenAction::Lift => write!(f, "lift"),
        }
    }
}

/// Command sequence for one pen transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenActuation {
    /// Command that moves the pen servo
    pub command: String,
    /// Pause after the command in milliseconds
    pub settle_ms: u64,
    /// Command sent after the pause
    pub release: String,
}

impl PenActuation {
    /// Create an actuation
    pub fn new(command: impl Into<String>, settle_ms: u64, release: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            settle_ms,
            release: release.into(),
        }
    }

    /// Pause between command and release
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Write the actuation to a transport, pausing in between
    pub fn send(&self, transport: &mut dyn Transport) -> Result<()> {
        transport.write(&self.command)?;
        if self.settle_ms > 0 {
            std::thread::sleep(self.settle());
        }
        if !self.release.is_empty() {
            transport.write(&self.release)?;
        }
        Ok(())
    }
}

/// Pen actuation commands for both transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenProtocol {
    /// Lowering sequence
    pub drop: PenActuation,
    /// Lifting sequence
    pub lift: PenActuation,
}

impl PenProtocol {
    /// Actuation for a transition
    pub fn actuation(&self, action: PenAction) -> &PenActuation {
        match action {
            PenAction::Drop => &self.drop,
            PenAction::Lift => &self.lift,
        }
    }

    /// Same protocol without settle pauses
    pub fn without_pauses(mut self) -> Self {
        self.drop.settle_ms = 0;
        self.lift.settle_ms = 0;
        self
    }
}

impl Default for PenProtocol {
    fn default() -> Self {
        Self {
            drop: PenActuation::new("c30d1s1agw-1agw100s", 700, "u"),
            lift: PenActuation::new("c170d1s1agw-1agw100s", 700, "u"),
        }
    }
}

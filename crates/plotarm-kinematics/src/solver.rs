//! Two-link inverse kinematics with cumulative step bookkeeping
//!
//! The arm has a shoulder joint (A) at the origin and an elbow joint (B)
//! between the two links. For a pen target at distance `l` from the base:
//! - the elbow angle is the interior angle at the elbow from the law of
//!   cosines, `acos((A² + B² − l²) / 2AB)`
//! - the shoulder angle is half a turn minus the sum of the angle between the
//!   first link and the target line and the angle between the target line and
//!   the x-axis, so it is measured from the negative x-axis
//!
//! Only one of the two elbow configurations is reachable through this
//! formula; the mirrored configuration is never produced.
//!
//! Joint totals are recomputed from the absolute angles on every move, so the
//! only quantization error is the single truncation of that move.

use crate::gearing::{AngleStepConverter, GearRatio};
use plotarm_core::{Angle, KinematicsError, Point, Result};
use serde::{Deserialize, Serialize};

/// Step bookkeeping for one joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JointState {
    /// Absolute joint position in steps since the last reset
    pub total_steps: i64,
    /// Steps commanded by the most recent move
    pub target_delta: i64,
}

impl JointState {
    fn set_total(&mut self, total_steps: i64) {
        self.target_delta = total_steps - self.total_steps;
        self.total_steps = total_steps;
    }
}

/// Step bookkeeping for both joints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmState {
    /// Shoulder joint (A)
    pub shoulder: JointState,
    /// Elbow joint (B)
    pub elbow: JointState,
}

impl ArmState {
    /// Deltas of the most recent move as (shoulder, elbow)
    pub fn deltas(&self) -> (i64, i64) {
        (self.shoulder.target_delta, self.elbow.target_delta)
    }

    /// Absolute totals as (shoulder, elbow)
    pub fn totals(&self) -> (i64, i64) {
        (self.shoulder.total_steps, self.elbow.total_steps)
    }
}

/// Cartesian positions of the elbow joint and the pen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmPose {
    /// Elbow joint position
    pub elbow: Point,
    /// Pen position
    pub pen: Point,
}

/// Two-link arm solver
#[derive(Debug, Clone)]
pub struct TwoLinkSolver {
    shoulder_length: f64,
    elbow_length: f64,
    converter: AngleStepConverter,
    state: ArmState,
}

impl TwoLinkSolver {
    /// Create a solver with the arm at its home position
    pub fn new(shoulder_length: f64, elbow_length: f64, ratio: GearRatio) -> Result<Self> {
        for (name, length) in [("shoulder", shoulder_length), ("elbow", elbow_length)] {
            if !length.is_finite() || length <= 0.0 {
                return Err(KinematicsError::InvalidGeometry {
                    reason: format!("{} link length must be positive, got {}", name, length),
                }
                .into());
            }
        }
        Ok(Self {
            shoulder_length,
            elbow_length,
            converter: AngleStepConverter::new(ratio),
            state: ArmState::default(),
        })
    }

    /// Length of the first link (A)
    pub fn shoulder_length(&self) -> f64 {
        self.shoulder_length
    }

    /// Length of the second link (B)
    pub fn elbow_length(&self) -> f64 {
        self.elbow_length
    }

    /// Step converter shared by both joints
    pub fn converter(&self) -> &AngleStepConverter {
        &self.converter
    }

    /// Current step bookkeeping
    pub fn state(&self) -> ArmState {
        self.state
    }

    /// Shoulder joint bookkeeping
    pub fn shoulder(&self) -> JointState {
        self.state.shoulder
    }

    /// Elbow joint bookkeeping
    pub fn elbow(&self) -> JointState {
        self.state.elbow
    }

    /// Innermost and outermost reachable distance from the base
    pub fn reach(&self) -> (f64, f64) {
        (
            (self.shoulder_length - self.elbow_length).abs(),
            self.shoulder_length + self.elbow_length,
        )
    }

    /// Check whether a target can be solved
    pub fn is_reachable(&self, target: Point) -> bool {
        self.solve(target).is_ok()
    }

    /// Joint angles (shoulder, elbow) for a target without moving the arm
    pub fn solve(&self, target: Point) -> Result<(Angle, Angle)> {
        let Point { x, y } = target;
        let distance_sq = x * x + y * y;
        let distance = distance_sq.sqrt();
        let (min_reach, max_reach) = self.reach();

        // The base itself has no defined target direction.
        if !(distance > 0.0) || distance > max_reach || distance < min_reach {
            return Err(KinematicsError::UnreachableTarget {
                x,
                y,
                distance,
                min_reach,
                max_reach,
            }
            .into());
        }

        let a = self.shoulder_length;
        let b = self.elbow_length;

        let cos_elbow = ((a * a + b * b - distance_sq) / (2.0 * a * b)).clamp(-1.0, 1.0);
        let elbow = Angle::from_radians(cos_elbow.acos());

        let cos_inner = (-(b * elbow.radians().cos() - a) / distance).clamp(-1.0, 1.0);
        let inner = Angle::from_radians(cos_inner.acos());

        let mut bearing = Angle::from_radians((x / distance).clamp(-1.0, 1.0).acos());
        if y < 0.0 {
            bearing = -bearing;
        }

        let shoulder = Angle::half() - (inner + bearing);
        Ok((shoulder, elbow))
    }

    /// Move the pen to (x, y)
    ///
    /// Overwrites both joint totals with the absolute step positions for the
    /// target and records the deltas from the previous totals. On error the
    /// state is left untouched.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<ArmState> {
        self.move_to_point(Point::new(x, y))
    }

    /// Move the pen to `target`
    pub fn move_to_point(&mut self, target: Point) -> Result<ArmState> {
        let (shoulder, elbow) = self.solve(target)?;
        let shoulder_steps = self.converter.angle_to_steps(shoulder);
        let elbow_steps = self.converter.angle_to_steps(elbow);

        self.state.shoulder.set_total(shoulder_steps);
        self.state.elbow.set_total(elbow_steps);

        tracing::debug!(
            "Move to {}: shoulder {} ({} steps), elbow {} ({} steps)",
            target,
            shoulder,
            self.state.shoulder.target_delta,
            elbow,
            self.state.elbow.target_delta
        );
        Ok(self.state)
    }

    /// Logically return both joints to zero
    ///
    /// The deltas become the negated totals; the arm only physically returns
    /// once the resulting motion is sent.
    pub fn reset(&mut self) -> ArmState {
        self.state.shoulder.set_total(0);
        self.state.elbow.set_total(0);
        tracing::debug!("Reset joints, deltas {:?}", self.state.deltas());
        self.state
    }

    /// Put back bookkeeping taken earlier with [`TwoLinkSolver::state`]
    ///
    /// Used when a move was solved but never reached the arm.
    pub fn restore(&mut self, state: ArmState) {
        self.state = state;
    }

    /// Joint angles (shoulder, elbow) of the current totals
    pub fn joint_angles(&self) -> (Angle, Angle) {
        (
            self.converter.steps_to_angle(self.state.shoulder.total_steps),
            self.converter.steps_to_angle(self.state.elbow.total_steps),
        )
    }

    /// Elbow and pen positions for a pair of joint angles
    pub fn forward(&self, shoulder: Angle, elbow: Angle) -> ArmPose {
        let theta = shoulder.radians();
        let joint = Point::new(
            -self.shoulder_length * theta.cos(),
            self.shoulder_length * theta.sin(),
        );
        let reach = (elbow - shoulder).radians();
        let pen = joint.offset(
            self.elbow_length * reach.cos(),
            self.elbow_length * reach.sin(),
        );
        ArmPose { elbow: joint, pen }
    }

    /// Elbow and pen positions of the current totals
    pub fn pose(&self) -> ArmPose {
        let (shoulder, elbow) = self.joint_angles();
        self.forward(shoulder, elbow)
    }
}

impl Default for TwoLinkSolver {
    fn default() -> Self {
        Self {
            shoulder_length: 10.0,
            elbow_length: 10.0,
            converter: AngleStepConverter::default(),
            state: ArmState::default(),
        }
    }
}

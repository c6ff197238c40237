//! # PlotArm Kinematics
//!
//! Step/angle conversion through the joint gear trains and the two-link
//! (shoulder/elbow) inverse kinematics that turns a pen target into absolute
//! and incremental stepper positions.

pub mod gearing;
pub mod solver;

pub use gearing::{AngleStepConverter, GearRatio};
pub use solver::{ArmPose, ArmState, JointState, TwoLinkSolver};

//! # PlotArm Core
//!
//! Core types, traits, and utilities for PlotArm.
//! Provides the geometry primitives shared by the path, kinematics and
//! planning crates, the explicit angle unit, the error taxonomy and the
//! transport boundary that motor commands are written to.

pub mod data;
pub mod error;
pub mod transport;
pub mod units;

pub use data::{PenState, Point, Waypoint};

pub use error::{ConnectionError, Error, KinematicsError, PathError, Result};

pub use transport::Transport;

pub use units::Angle;

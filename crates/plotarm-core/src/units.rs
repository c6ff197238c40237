//! Angle unit handling
//!
//! Joint angles are stored in turns (1.0 = 360°). Conversions to half-turns
//! (the unit the gear-train formulas are written in), radians and degrees
//! happen only at the edges: trigonometry and display.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A joint angle, stored in turns
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle {
    turns: f64,
}

impl Angle {
    /// Zero rotation
    pub const ZERO: Angle = Angle { turns: 0.0 };

    /// Create an angle from full turns (1.0 = 360°)
    pub const fn from_turns(turns: f64) -> Self {
        Self { turns }
    }

    /// Create an angle from half-turns (1.0 = π radians = 180°)
    pub fn from_half_turns(half_turns: f64) -> Self {
        Self {
            turns: half_turns / 2.0,
        }
    }

    /// Create an angle from radians
    pub fn from_radians(radians: f64) -> Self {
        Self {
            turns: radians / TAU,
        }
    }

    /// Create an angle from degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            turns: degrees / 360.0,
        }
    }

    /// Angle in full turns
    pub fn turns(self) -> f64 {
        self.turns
    }

    /// Angle in half-turns
    pub fn half_turns(self) -> f64 {
        self.turns * 2.0
    }

    /// Angle in radians
    pub fn radians(self) -> f64 {
        self.turns * TAU
    }

    /// Angle in degrees
    pub fn degrees(self) -> f64 {
        self.turns * 360.0
    }

    /// Half a turn
    pub fn half() -> Self {
        Self::from_radians(PI)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_turns(self.turns + rhs.turns)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_turns(self.turns - rhs.turns)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_turns(-self.turns)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}°", self.degrees())
    }
}

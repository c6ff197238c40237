//! Geometry primitives for the plotting pipeline
//!
//! This module provides:
//! - `Point`, a plain (x, y) coordinate in the arm's base frame
//! - `Waypoint`, a point annotated with the pen contact it requires
//! - `PenState`, the planner's knowledge of where the pen currently is

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2-D coordinate relative to the arm's base
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// The arm's base
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point displaced by (dx, dy)
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}

/// A point on an interpolated path with its pen intent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Whether the pen must touch the surface when the arm arrives here
    pub pen_down: bool,
}

impl Waypoint {
    /// Create a new waypoint
    pub const fn new(x: f64, y: f64, pen_down: bool) -> Self {
        Self { x, y, pen_down }
    }

    /// Pen-up waypoint at `point`
    pub const fn travel(point: Point) -> Self {
        Self::new(point.x, point.y, false)
    }

    /// Pen-down waypoint at `point`
    pub const fn draw(point: Point) -> Self {
        Self::new(point.x, point.y, true)
    }

    /// Position without the pen flag
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Waypoint> for Point {
    fn from(waypoint: Waypoint) -> Self {
        waypoint.point()
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.pen_down { "LineTo" } else { "MoveTo" };
        write!(f, "{} ({}; {})", kind, self.x, self.y)
    }
}

/// Pen position as tracked by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenState {
    /// No actuation has been issued yet
    #[default]
    Unknown,
    /// Pen lifted off the surface
    Up,
    /// Pen in contact with the surface
    Down,
}

impl PenState {
    /// The state a waypoint requires
    pub fn required_by(waypoint: &Waypoint) -> Self {
        if waypoint.pen_down {
            PenState::Down
        } else {
            PenState::Up
        }
    }
}

impl fmt::Display for PenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenState::Unknown => write!(f, "unknown"),
            PenState::Up => write!(f, "up"),
            PenState::Down => write!(f, "down"),
        }
    }
}

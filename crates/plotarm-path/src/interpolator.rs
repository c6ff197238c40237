//! Path interpolator
//!
//! Replays the straight-line commands of a path description and yields a lazy
//! sequence of waypoints:
//! - `M`/`m` reposition with the pen up and yield exactly one waypoint
//! - `L l H h V v Z z` draw a line split into `ceil(length / step_size)` equal
//!   sub-segments, yielding every sub-segment end with the pen down
//! - `C c S s Q q T t A a` fail with [`PathError::UnsupportedCommand`]
//!
//! Extra operands after a command repeat it (`M` and `m` continue as `L` and
//! `l`). The sequence stops after the first error.

use crate::tokenizer::{tokenize, Token, Tokenizer};
use plotarm_core::{Error, PathError, Point, Result, Waypoint};
use serde::{Deserialize, Serialize};
use std::iter::Peekable;

/// Default distance between interpolated waypoints
pub const DEFAULT_STEP_SIZE: f64 = 1.0;

/// Interpolation settings
///
/// Serializes as the bare step size; deserializing runs the same check as
/// [`InterpolatorConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct InterpolatorConfig {
    step_size: f64,
}

impl InterpolatorConfig {
    /// Create a config, rejecting non-positive or non-finite step sizes
    pub fn new(step_size: f64) -> Result<Self> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(Error::other(format!(
                "Step size must be a positive number, got {}",
                step_size
            )));
        }
        Ok(Self { step_size })
    }

    /// Maximum distance between consecutive line waypoints
    pub fn step_size(&self) -> f64 {
        self.step_size
    }
}

impl TryFrom<f64> for InterpolatorConfig {
    type Error = Error;

    fn try_from(step_size: f64) -> Result<Self> {
        Self::new(step_size)
    }
}

impl From<InterpolatorConfig> for f64 {
    fn from(config: InterpolatorConfig) -> f64 {
        config.step_size
    }
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

/// A line being split into equal sub-segments
#[derive(Debug, Clone)]
struct LineSegment {
    start: Point,
    end: Point,
    steps: usize,
    next: usize,
}

impl LineSegment {
    fn new(start: Point, end: Point, step_size: f64) -> Self {
        let steps = (start.distance_to(&end) / step_size).ceil() as usize;
        Self {
            start,
            end,
            steps,
            next: 1,
        }
    }
}

impl Iterator for LineSegment {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next > self.steps {
            return None;
        }
        let j = self.next;
        self.next += 1;
        if j == self.steps {
            return Some(self.end);
        }
        let dx = (self.end.x - self.start.x) / self.steps as f64;
        let dy = (self.end.y - self.start.y) / self.steps as f64;
        Some(self.start.offset(dx * j as f64, dy * j as f64))
    }
}

/// Lazy waypoint sequence for one path description
pub struct PathInterpolator<'a> {
    tokens: Peekable<Tokenizer<'a>>,
    step_size: f64,
    current: Point,
    subpath_start: Point,
    repeat: Option<char>,
    line: Option<LineSegment>,
    done: bool,
}

impl<'a> PathInterpolator<'a> {
    /// Start interpolating `path` from the origin with the pen up
    ///
    /// Fails with [`PathError::Empty`] when the path is empty or whitespace.
    pub fn new(path: &'a str, config: &InterpolatorConfig) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(path)?.peekable(),
            step_size: config.step_size(),
            current: Point::ORIGIN,
            subpath_start: Point::ORIGIN,
            repeat: None,
            line: None,
            done: false,
        })
    }

    /// Continue from `start` instead of the origin
    ///
    /// The start waypoint itself is not yielded.
    pub fn starting_at(mut self, start: Waypoint) -> Self {
        self.current = start.point();
        self.subpath_start = start.point();
        self
    }

    /// Position the next relative command is measured from
    pub fn current(&self) -> Point {
        self.current
    }

    fn next_command(&mut self) -> std::result::Result<Option<char>, PathError> {
        match self.tokens.peek().copied() {
            None => Ok(None),
            Some(Token::Command(command)) => {
                self.tokens.next();
                self.repeat = match command {
                    'M' => Some('L'),
                    'm' => Some('l'),
                    'L' | 'l' | 'H' | 'h' | 'V' | 'v' => Some(command),
                    'Z' | 'z' => None,
                    _ => return Err(PathError::UnsupportedCommand { command }),
                };
                Ok(Some(command))
            }
            Some(Token::Operand(token)) => match self.repeat {
                Some(command) => Ok(Some(command)),
                None => Err(PathError::UnexpectedOperand {
                    token: token.to_string(),
                }),
            },
        }
    }

    fn number(&mut self, command: char) -> std::result::Result<f64, PathError> {
        match self.tokens.peek().copied() {
            Some(Token::Operand(token)) => {
                self.tokens.next();
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| PathError::InvalidOperand {
                        token: token.to_string(),
                    })
            }
            _ => Err(PathError::MissingOperand { command }),
        }
    }

    fn pair(&mut self, command: char) -> std::result::Result<(f64, f64), PathError> {
        let x = self.number(command)?;
        let y = self.number(command)?;
        Ok((x, y))
    }

    fn move_to(&mut self, target: Point) -> Waypoint {
        tracing::debug!("Move to {}", target);
        self.current = target;
        self.subpath_start = target;
        Waypoint::travel(target)
    }

    fn line_to(&mut self, target: Point) {
        tracing::debug!("Line from {} to {}", self.current, target);
        self.line = Some(LineSegment::new(self.current, target, self.step_size));
        self.current = target;
    }

    fn advance(&mut self) -> std::result::Result<Option<Waypoint>, PathError> {
        loop {
            if let Some(line) = self.line.as_mut() {
                if let Some(point) = line.next() {
                    return Ok(Some(Waypoint::draw(point)));
                }
                self.line = None;
            }

            let Some(command) = self.next_command()? else {
                return Ok(None);
            };

            match command {
                'M' => {
                    let (x, y) = self.pair(command)?;
                    return Ok(Some(self.move_to(Point::new(x, y))));
                }
                'm' => {
                    let (dx, dy) = self.pair(command)?;
                    let target = self.current.offset(dx, dy);
                    return Ok(Some(self.move_to(target)));
                }
                'L' => {
                    let (x, y) = self.pair(command)?;
                    self.line_to(Point::new(x, y));
                }
                'l' => {
                    let (dx, dy) = self.pair(command)?;
                    self.line_to(self.current.offset(dx, dy));
                }
                'H' => {
                    let x = self.number(command)?;
                    self.line_to(Point::new(x, self.current.y));
                }
                'h' => {
                    let dx = self.number(command)?;
                    self.line_to(self.current.offset(dx, 0.0));
                }
                'V' => {
                    let y = self.number(command)?;
                    self.line_to(Point::new(self.current.x, y));
                }
                'v' => {
                    let dy = self.number(command)?;
                    self.line_to(self.current.offset(0.0, dy));
                }
                'Z' | 'z' => self.line_to(self.subpath_start),
                _ => return Err(PathError::UnsupportedCommand { command }),
            }
        }
    }
}

impl Iterator for PathInterpolator<'_> {
    type Item = Result<Waypoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(waypoint)) => Some(Ok(waypoint)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                tracing::warn!("Path rejected: {}", e);
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl std::iter::FusedIterator for PathInterpolator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(path: &str) -> Vec<Waypoint> {
        PathInterpolator::new(path, &InterpolatorConfig::default())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn first_error(path: &str) -> Error {
        PathInterpolator::new(path, &InterpolatorConfig::default())
            .unwrap()
            .find_map(|w| w.err())
            .unwrap()
    }

    #[test]
    fn test_line_segment_counts() {
        let points: Vec<_> =
            LineSegment::new(Point::new(0.0, 0.0), Point::new(2.5, 0.0), 1.0).collect();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point::new(2.5, 0.0));

        let none: Vec<_> =
            LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 1.0).collect();
        assert!(none.is_empty());
    }

    #[test]
    fn test_move_yields_single_pen_up_waypoint() {
        assert_eq!(run("M3 4"), vec![Waypoint::new(3.0, 4.0, false)]);
    }

    #[test]
    fn test_relative_move() {
        let points = run("M1 1m2 -3");
        assert_eq!(points[1], Waypoint::new(3.0, -2.0, false));
    }

    #[test]
    fn test_line_ends_exactly_at_destination() {
        let points = run("M0 0L3 4");
        assert_eq!(points.len(), 1 + 5);
        assert_eq!(*points.last().unwrap(), Waypoint::new(3.0, 4.0, true));
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        let points = run("M1 1H4V3h-1v-1");
        let corners: Vec<_> = points.iter().map(|w| w.point()).collect();
        assert!(corners.contains(&Point::new(4.0, 1.0)));
        assert!(corners.contains(&Point::new(4.0, 3.0)));
        assert_eq!(*corners.last().unwrap(), Point::new(3.0, 2.0));
    }

    #[test]
    fn test_close_path_returns_to_subpath_start() {
        let points = run("M2 0L4 0z");
        assert_eq!(*points.last().unwrap(), Waypoint::new(2.0, 0.0, true));
    }

    #[test]
    fn test_implicit_repetition() {
        let points = run("M0 0 2 0 2 2");
        assert_eq!(points[0], Waypoint::new(0.0, 0.0, false));
        assert!(points[1..].iter().all(|w| w.pen_down));
        assert_eq!(*points.last().unwrap(), Waypoint::new(2.0, 2.0, true));
    }

    #[test]
    fn test_starting_point() {
        let interpolator = PathInterpolator::new("l1 0", &InterpolatorConfig::default())
            .unwrap()
            .starting_at(Waypoint::new(5.0, 5.0, true));
        let points: Vec<_> = interpolator.collect::<Result<_>>().unwrap();
        assert_eq!(points, vec![Waypoint::new(6.0, 5.0, true)]);
    }

    #[test]
    fn test_unsupported_command() {
        let err = first_error("M0 0C1 1 2 2 3 3");
        assert!(err.is_unsupported_command());
    }

    #[test]
    fn test_invalid_operands() {
        assert!(first_error("M0 x").is_invalid_input());
        assert!(matches!(
            first_error("M0"),
            Error::Path(PathError::MissingOperand { command: 'M' })
        ));
        assert!(matches!(
            first_error("5 5"),
            Error::Path(PathError::UnexpectedOperand { .. })
        ));
        assert!(matches!(
            first_error("M0 0Z 1"),
            Error::Path(PathError::UnexpectedOperand { .. })
        ));
    }

    #[test]
    fn test_stops_after_first_error() {
        let mut interpolator =
            PathInterpolator::new("M0 0Q1 1 2 2L5 5", &InterpolatorConfig::default()).unwrap();
        assert!(interpolator.next().unwrap().is_ok());
        assert!(interpolator.next().unwrap().is_err());
        assert!(interpolator.next().is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(InterpolatorConfig::new(0.5).is_ok());
        assert!(InterpolatorConfig::new(0.0).is_err());
        assert!(InterpolatorConfig::new(-1.0).is_err());
        assert!(InterpolatorConfig::new(f64::NAN).is_err());
        assert_eq!(InterpolatorConfig::new(0.5).unwrap().step_size(), 0.5);
    }

    #[test]
    fn test_deserialize_validates_step_size() {
        let config: InterpolatorConfig = serde_json::from_str("0.25").unwrap();
        assert_eq!(config.step_size(), 0.25);
        assert_eq!(serde_json::to_string(&config).unwrap(), "0.25");

        assert!(serde_json::from_str::<InterpolatorConfig>("0.0").is_err());
        assert!(serde_json::from_str::<InterpolatorConfig>("-3.0").is_err());
    }
}

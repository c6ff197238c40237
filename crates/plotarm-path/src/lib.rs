//! # PlotArm Path
//!
//! Turns a path description (the `d` attribute grammar of SVG paths) into a
//! dense polyline of waypoints annotated with pen intent.
//!
//! Straight-line commands are interpolated into evenly spaced sub-segments so
//! the distance between consecutive commanded points never exceeds the
//! configured step size. Curves and arcs are recognized by the tokenizer but
//! rejected by the interpolator.

pub mod interpolator;
pub mod tokenizer;

pub use interpolator::{InterpolatorConfig, PathInterpolator, DEFAULT_STEP_SIZE};
pub use tokenizer::{is_command, tokenize, Token, Tokenizer, COMMANDS};

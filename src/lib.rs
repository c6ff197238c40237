//! # PlotArm
//!
//! Driver for a two-link (shoulder/elbow) pen-plotting arm with stepper
//! joints. Turns path descriptions into stepper motor and pen commands.
//!
//! ## Architecture
//!
//! PlotArm is organized as a workspace with multiple crates:
//!
//! 1. **plotarm-core** - Geometry primitives, angle unit, errors, transport trait
//! 2. **plotarm-path** - Path tokenizer and straight-line interpolation
//! 3. **plotarm-kinematics** - Gear-train step conversion and two-link inverse kinematics
//! 4. **plotarm-planner** - Pen-state tracking and motion command generation
//! 5. **plotarm-communication** - Serial, dry-run and recording transports
//! 6. **plotarm-settings** - TOML/JSON configuration
//! 7. **plotarm** - Operator console binary that integrates all crates

pub mod console;

pub use plotarm_core::{
    Angle, ConnectionError, Error, KinematicsError, PathError, PenState, Point, Result,
    Transport, Waypoint,
};

pub use plotarm_path::{tokenize, InterpolatorConfig, PathInterpolator, Token, Tokenizer};

pub use plotarm_kinematics::{
    AngleStepConverter, ArmPose, ArmState, GearRatio, JointState, TwoLinkSolver,
};

pub use plotarm_planner::{
    MotionCommand, MotionPlanner, PenAction, PenActuation, PenProtocol, PlanSummary,
    PlannedMove,
};

pub use plotarm_communication::{
    list_ports, ConnectionParams, NoOpTransport, RecordingTransport, SerialParity,
    SerialPortInfo, SerialTransport,
};

pub use plotarm_settings::{Config, ConfigError, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for the console
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

//! # PlotArm Communication
//!
//! Transports that carry motor and pen commands to the arm controller.
//! [`SerialTransport`] talks to real hardware; [`NoOpTransport`] and
//! [`RecordingTransport`] stand in for it during dry runs and tests.

pub mod memory;
pub mod params;
pub mod serial;

pub use memory::{NoOpTransport, RecordingTransport};
pub use params::{ConnectionParams, SerialParity, DEFAULT_BAUD_RATE};
pub use serial::{list_ports, SerialPortInfo, SerialTransport};

//! Error handling for PlotArm
//!
//! Provides error types for all layers of the pipeline:
//! - Path errors (tokenizing/interpolating a path description)
//! - Kinematics errors (unreachable targets, invalid arm geometry)
//! - Connection errors (transport to the arm controller)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Path description error type
///
/// Raised while tokenizing or interpolating a path description. Every variant
/// except [`PathError::UnsupportedCommand`] is an invalid-input condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Path description is empty or only whitespace
    #[error("Path description must not be empty")]
    Empty,

    /// Operand is not a number
    #[error("Invalid operand '{token}': not a number")]
    InvalidOperand {
        /// The offending operand text.
        token: String,
    },

    /// Command ended before all of its operands were read
    #[error("Command '{command}' is missing operands")]
    MissingOperand {
        /// The command letter.
        command: char,
    },

    /// Operand appeared before any command
    #[error("Unexpected operand '{token}' with no active command")]
    UnexpectedOperand {
        /// The offending operand text.
        token: String,
    },

    /// Command is recognized but has no interpolation behavior
    #[error("Unsupported path command '{command}'")]
    UnsupportedCommand {
        /// The command letter.
        command: char,
    },
}

impl PathError {
    /// Check if this error is an invalid-input condition
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PathError::UnsupportedCommand { .. })
    }
}

/// Kinematics error type
///
/// Represents errors raised by the two-link solver and the gear conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Target lies outside the reachable annulus of the arm
    #[error(
        "Target ({x}, {y}) is unreachable: distance {distance} outside [{min_reach}, {max_reach}]"
    )]
    UnreachableTarget {
        /// Requested X coordinate.
        x: f64,
        /// Requested Y coordinate.
        y: f64,
        /// Distance from the arm base to the target.
        distance: f64,
        /// Innermost reachable distance.
        min_reach: f64,
        /// Outermost reachable distance.
        max_reach: f64,
    },

    /// Arm or gear parameters cannot describe a physical arm
    #[error("Invalid arm geometry: {reason}")]
    InvalidGeometry {
        /// Why the geometry was rejected.
        reason: String,
    },
}

/// Connection error type
///
/// Represents errors related to the transport carrying commands to the arm.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// No port is open
    #[error("Transport not connected")]
    NotConnected,

    /// Failed to open port
    #[error("Failed to open port {port}: {reason}")]
    FailedToOpen {
        /// The name of the port that failed to open.
        port: String,
        /// The reason the port failed to open.
        reason: String,
    },

    /// Write to the port failed
    #[error("Write failed: {reason}")]
    WriteFailed {
        /// The reason the write failed.
        reason: String,
    },

    /// Port enumeration failed
    #[error("Failed to enumerate ports: {reason}")]
    Enumeration {
        /// The reason enumeration failed.
        reason: String,
    },
}

/// Main error type for PlotArm
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Path description error
    #[error(transparent)]
    Path(#[from] PathError),

    /// Kinematics error
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a path error
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this is an invalid-input path error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::Path(e) if e.is_invalid_input())
    }

    /// Check if this is an unsupported-command path error
    pub fn is_unsupported_command(&self) -> bool {
        matches!(self, Error::Path(PathError::UnsupportedCommand { .. }))
    }

    /// Check if this is an unreachable-target error
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Error::Kinematics(KinematicsError::UnreachableTarget { .. })
        )
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_display() {
        assert_eq!(
            PathError::Empty.to_string(),
            "Path description must not be empty"
        );
        assert_eq!(
            PathError::UnsupportedCommand { command: 'C' }.to_string(),
            "Unsupported path command 'C'"
        );
        assert_eq!(
            PathError::InvalidOperand {
                token: "1.2.3".to_string()
            }
            .to_string(),
            "Invalid operand '1.2.3': not a number"
        );
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(PathError::Empty.is_invalid_input());
        assert!(PathError::MissingOperand { command: 'L' }.is_invalid_input());
        assert!(!PathError::UnsupportedCommand { command: 'A' }.is_invalid_input());
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = PathError::UnsupportedCommand { command: 'q' }.into();
        assert!(err.is_path_error());
        assert!(err.is_unsupported_command());
        assert!(!err.is_invalid_input());

        let err: Error = KinematicsError::UnreachableTarget {
            x: 21.0,
            y: 0.0,
            distance: 21.0,
            min_reach: 0.0,
            max_reach: 20.0,
        }
        .into();
        assert!(err.is_unreachable());

        let err: Error = ConnectionError::NotConnected.into();
        assert!(err.is_connection_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(Error::from(io_err), Error::Io(_)));
    }
}

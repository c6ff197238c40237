//! Serial connection parameters

use plotarm_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default baud rate of the arm controller
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Serial parity setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialParity {
    /// No parity bit
    #[default]
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

impl fmt::Display for SerialParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialParity::None => write!(f, "N"),
            SerialParity::Even => write!(f, "E"),
            SerialParity::Odd => write!(f, "O"),
        }
    }
}

/// Parameters for opening a serial connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port: String,

    /// Baud rate
    pub baud_rate: u32,

    /// Data bits (5-8)
    pub data_bits: u8,

    /// Stop bits (1 or 2)
    pub stop_bits: u8,

    /// Parity
    pub parity: SerialParity,

    /// Hardware flow control
    pub flow_control: bool,

    /// Assert RTS after opening
    pub rts: bool,

    /// Assert DTR after opening
    pub dtr: bool,

    /// Read/write timeout in milliseconds
    pub timeout_ms: u64,
}

impl ConnectionParams {
    /// Parameters for `port` at `baud_rate`, 8N1 with RTS and DTR asserted
    pub fn serial(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            ..Default::default()
        }
    }

    /// Check the parameters before opening a port
    pub fn validate(&self) -> Result<()> {
        if self.port.trim().is_empty() {
            return Err(Error::other("Port name is empty"));
        }
        if self.baud_rate == 0 {
            return Err(Error::other("Baud rate must be greater than zero"));
        }
        if !(5..=8).contains(&self.data_bits) {
            return Err(Error::other(format!(
                "Invalid data bits: {}",
                self.data_bits
            )));
        }
        if !matches!(self.stop_bits, 1 | 2) {
            return Err(Error::other(format!(
                "Invalid stop bits: {}",
                self.stop_bits
            )));
        }
        Ok(())
    }
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: 8,
            stop_bits: 1,
            parity: SerialParity::None,
            flow_control: false,
            rts: true,
            dtr: true,
            timeout_ms: 1000,
        }
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} {}{}{}",
            self.port, self.baud_rate, self.data_bits, self.parity, self.stop_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_8n1() {
        let params = ConnectionParams::serial("COM3", 9600);
        assert_eq!(params.data_bits, 8);
        assert_eq!(params.parity, SerialParity::None);
        assert_eq!(params.stop_bits, 1);
        assert!(params.rts && params.dtr);
        assert!(!params.flow_control);
        assert_eq!(params.to_string(), "COM3 @ 9600 8N1");
    }

    #[test]
    fn test_validate() {
        assert!(ConnectionParams::serial("/dev/ttyUSB0", 115200).validate().is_ok());
        assert!(ConnectionParams::default().validate().is_err());
        assert!(ConnectionParams::serial("COM1", 0).validate().is_err());

        let mut params = ConnectionParams::serial("COM1", 9600);
        params.data_bits = 9;
        assert!(params.validate().is_err());
        params.data_bits = 7;
        params.stop_bits = 3;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let params: ConnectionParams =
            serde_json::from_str(r#"{"port":"COM4","parity":"even"}"#).unwrap();
        assert_eq!(params.port, "COM4");
        assert_eq!(params.parity, SerialParity::Even);
        assert_eq!(params.baud_rate, DEFAULT_BAUD_RATE);
    }
}

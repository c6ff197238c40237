//! Serial port transport
//!
//! Provides port enumeration and a write-only transport to the arm controller
//! over USB or RS-232. Commands are sent verbatim with no terminator, and the
//! controller is never waited on.

use crate::params::{ConnectionParams, SerialParity};
use plotarm_core::{ConnectionError, Result, Transport};
use std::io::{Read, Write};
use std::time::Duration;

/// Information about an available serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortInfo {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port_name: String,

    /// Port description (e.g., "USB Serial Port")
    pub description: String,

    /// Manufacturer name if available
    pub manufacturer: Option<String>,

    /// USB vendor and product IDs if applicable
    pub usb_ids: Option<(u16, u16)>,
}

impl SerialPortInfo {
    /// Create a new port info
    pub fn new(port_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            description: description.into(),
            manufacturer: None,
            usb_ids: None,
        }
    }
}

impl std::fmt::Display for SerialPortInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.port_name, self.description)
    }
}

/// List the serial ports available on the system
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    let ports = serialport::available_ports().map_err(|e| {
        tracing::error!("Failed to enumerate serial ports: {}", e);
        ConnectionError::Enumeration {
            reason: e.to_string(),
        }
    })?;

    Ok(ports
        .iter()
        .map(|port| {
            let mut info = SerialPortInfo::new(&port.port_name, port_description(port));
            if let serialport::SerialPortType::UsbPort(usb) = &port.port_type {
                info.manufacturer = usb.manufacturer.clone();
                info.usb_ids = Some((usb.vid, usb.pid));
            }
            info
        })
        .collect())
}

fn port_description(port: &serialport::SerialPortInfo) -> String {
    match &port.port_type {
        serialport::SerialPortType::UsbPort(usb) => format!(
            "USB {} {}",
            usb.manufacturer.as_deref().unwrap_or("Device"),
            usb.product.as_deref().unwrap_or("Serial Port")
        ),
        serialport::SerialPortType::BluetoothPort => "Bluetooth Serial".to_string(),
        serialport::SerialPortType::PciPort => "PCI Serial".to_string(),
        _ => "Serial Port".to_string(),
    }
}

fn to_serialport_parity(parity: SerialParity) -> serialport::Parity {
    match parity {
        SerialParity::None => serialport::Parity::None,
        SerialParity::Even => serialport::Parity::Even,
        SerialParity::Odd => serialport::Parity::Odd,
    }
}

fn to_data_bits(bits: u8) -> Option<serialport::DataBits> {
    match bits {
        5 => Some(serialport::DataBits::Five),
        6 => Some(serialport::DataBits::Six),
        7 => Some(serialport::DataBits::Seven),
        8 => Some(serialport::DataBits::Eight),
        _ => None,
    }
}

fn to_stop_bits(bits: u8) -> Option<serialport::StopBits> {
    match bits {
        1 => Some(serialport::StopBits::One),
        2 => Some(serialport::StopBits::Two),
        _ => None,
    }
}

/// Open serial connection to the arm controller
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port with the given parameters
    pub fn open(params: &ConnectionParams) -> Result<Self> {
        params.validate()?;
        let failed = |reason: String| ConnectionError::FailedToOpen {
            port: params.port.clone(),
            reason,
        };

        let data_bits = to_data_bits(params.data_bits)
            .ok_or_else(|| failed(format!("invalid data bits {}", params.data_bits)))?;
        let stop_bits = to_stop_bits(params.stop_bits)
            .ok_or_else(|| failed(format!("invalid stop bits {}", params.stop_bits)))?;

        let mut port = serialport::new(&params.port, params.baud_rate)
            .timeout(Duration::from_millis(params.timeout_ms))
            .data_bits(data_bits)
            .stop_bits(stop_bits)
            .parity(to_serialport_parity(params.parity))
            .flow_control(if params.flow_control {
                serialport::FlowControl::Hardware
            } else {
                serialport::FlowControl::None
            })
            .open()
            .map_err(|e| {
                tracing::warn!("Failed to open serial port {}: {}", params.port, e);
                failed(e.to_string())
            })?;

        port.write_request_to_send(params.rts)
            .and_then(|_| port.write_data_terminal_ready(params.dtr))
            .map_err(|e| failed(e.to_string()))?;

        tracing::info!("Connected to {}", params);
        Ok(Self {
            port,
            port_name: params.port.clone(),
        })
    }

    /// Name of the open port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, command: &str) -> Result<()> {
        tracing::debug!("-> {}", command);
        self.port
            .write_all(command.as_bytes())
            .and_then(|_| self.port.flush())
            .map_err(|e| {
                ConnectionError::WriteFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn name(&self) -> String {
        self.port_name.clone()
    }

    /// Read whatever the controller has echoed back so far
    ///
    /// Never blocks waiting for data that has not arrived yet.
    fn drain_incoming(&mut self) -> Result<Vec<u8>> {
        let pending = self
            .port
            .bytes_to_read()
            .map_err(std::io::Error::from)? as usize;
        let mut buf = vec![0; pending];
        if pending > 0 {
            self.port.read_exact(&mut buf)?;
        }
        Ok(buf)
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port_name", &self.port_name)
            .finish()
    }
}

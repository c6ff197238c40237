//! Transports that never touch hardware

use plotarm_core::{Result, Transport};

/// Transport that only logs commands
///
/// Used when no port is open, so paths can still be previewed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpTransport;

impl NoOpTransport {
    /// Create a dry-run transport
    pub fn new() -> Self {
        Self
    }
}

impl Transport for NoOpTransport {
    fn write(&mut self, command: &str) -> Result<()> {
        tracing::debug!("(dry run) {}", command);
        Ok(())
    }

    fn name(&self) -> String {
        "dry run".to_string()
    }
}

/// Transport that keeps every command in order
#[derive(Debug, Default, Clone)]
pub struct RecordingTransport {
    commands: Vec<String>,
}

impl RecordingTransport {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands written so far
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recording empty
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }

    /// Forget the recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Transport for RecordingTransport {
    fn write(&mut self, command: &str) -> Result<()> {
        self.commands.push(command.to_string());
        Ok(())
    }

    fn name(&self) -> String {
        "recording".to_string()
    }
}

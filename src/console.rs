//! Line-oriented operator console
//!
//! Each input line is one of:
//! - `exit` ends the session
//! - `ports` lists serial ports
//! - `con <port> <baud>` opens a serial connection
//! - `out <raw>` writes a raw command to the device
//! - `reset` returns the arm to its home position
//! - `config` prints the effective configuration
//!
//! Anything else is drawn as a path.

use anyhow::{bail, Context};
use plotarm_communication::{list_ports, NoOpTransport, SerialTransport};
use plotarm_core::Transport;
use plotarm_planner::MotionPlanner;
use plotarm_settings::Config;
use std::io::Write;

/// A parsed console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank line
    Empty,
    /// End the session
    Exit,
    /// List serial ports
    Ports,
    /// Open a serial connection
    Connect { port: &'a str, baud_rate: u32 },
    /// Write a raw device command
    Out(&'a str),
    /// Home the arm
    Reset,
    /// Print the configuration
    Config,
    /// Draw a path
    Path(&'a str),
}

impl<'a> Command<'a> {
    /// Parse one input line
    pub fn parse(line: &'a str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        Ok(match word {
            "" => Command::Empty,
            "exit" => Command::Exit,
            "ports" => Command::Ports,
            "reset" => Command::Reset,
            "config" => Command::Config,
            "out" => {
                if rest.is_empty() {
                    bail!("usage: out <raw command>");
                }
                Command::Out(rest)
            }
            "con" => {
                let mut args = rest.split_whitespace();
                let (Some(port), Some(baud), None) = (args.next(), args.next(), args.next())
                else {
                    bail!("usage: con <port> <baud>");
                };
                let baud_rate = baud
                    .parse()
                    .with_context(|| format!("invalid baud rate '{}'", baud))?;
                Command::Connect { port, baud_rate }
            }
            _ => Command::Path(line),
        })
    }
}

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Console state: configuration, planner and the open transport
pub struct Session {
    config: Config,
    planner: MotionPlanner,
    transport: Box<dyn Transport>,
}

impl Session {
    /// Start a session in dry-run mode
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let planner = config.planner().context("invalid arm configuration")?;
        Ok(Self {
            config,
            planner,
            transport: Box::new(NoOpTransport::new()),
        })
    }

    /// Replace the transport, e.g. with one opened elsewhere
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// The planner driving the arm
    pub fn planner(&self) -> &MotionPlanner {
        &self.planner
    }

    /// Execute one command, writing feedback to `out`
    pub fn handle(&mut self, command: Command<'_>, out: &mut dyn Write) -> anyhow::Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Exit => return Ok(Flow::Exit),
            Command::Ports => {
                let ports = list_ports()?;
                if ports.is_empty() {
                    writeln!(out, "No serial ports found")?;
                }
                for port in ports {
                    writeln!(out, "{}", port)?;
                }
            }
            Command::Connect { port, baud_rate } => {
                let mut params = self.config.connection_params();
                params.port = port.to_string();
                params.baud_rate = baud_rate;
                self.transport = Box::new(SerialTransport::open(&params)?);
                writeln!(out, "Connected to {}", params)?;
            }
            Command::Out(raw) => {
                self.transport.write(raw)?;
                self.echo(out)?;
            }
            Command::Reset => {
                let motion = self.planner.home(self.transport.as_mut())?;
                writeln!(out, "Home ({})", motion)?;
                self.echo(out)?;
            }
            Command::Config => {
                let text = toml::to_string_pretty(&self.config)?;
                write!(out, "{}", text)?;
            }
            Command::Path(path) => self.draw(path, out)?,
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self, path: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let converter = *self.planner.solver().converter();

        for waypoint in self.planner.waypoints(path)? {
            let planned = self.planner.send(waypoint?, self.transport.as_mut())?;
            let shoulder = converter.steps_to_angle(planned.state.shoulder.total_steps);
            let elbow = converter.steps_to_angle(planned.state.elbow.total_steps);
            writeln!(
                out,
                "{}  shoulder {}  elbow {}",
                planned.waypoint, shoulder, elbow
            )?;
            self.echo(out)?;
        }
        Ok(())
    }

    /// Print whatever the device sent back
    fn echo(&mut self, out: &mut dyn Write) -> anyhow::Result<()> {
        let incoming = self.transport.drain_incoming()?;
        if !incoming.is_empty() {
            write!(out, "{}", String::from_utf8_lossy(&incoming))?;
        }
        Ok(())
    }
}

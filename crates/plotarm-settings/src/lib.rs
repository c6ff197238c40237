//! PlotArm Settings Crate
//!
//! Handles application configuration: arm geometry, gearing, interpolation,
//! pen commands and the serial connection, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    ArmSettings, Config, ConfigFormat, GearingSettings, PlotterSettings, APP_DIR_NAME,
    CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

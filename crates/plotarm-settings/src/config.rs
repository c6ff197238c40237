//! Configuration management for PlotArm
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! files; the default file lives in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Arm geometry (link lengths)
//! - Gearing (gear trains and motor resolution)
//! - Plotter (interpolation step size)
//! - Pen actuation commands
//! - Serial connection

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use plotarm_communication::ConnectionParams;
use plotarm_kinematics::gearing::{
    DEFAULT_A_TRAIN, DEFAULT_B_TRAIN, DEFAULT_STEPS_PER_MOTOR_REVOLUTION,
};
use plotarm_kinematics::{GearRatio, TwoLinkSolver};
use plotarm_path::{InterpolatorConfig, DEFAULT_STEP_SIZE};
use plotarm_planner::{MotionPlanner, PenProtocol};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
pub const APP_DIR_NAME: &str = "plotarm";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Arm geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmSettings {
    /// Length of the first link, shoulder to elbow
    pub shoulder_length: f64,
    /// Length of the second link, elbow to pen
    pub elbow_length: f64,
}

impl Default for ArmSettings {
    fn default() -> Self {
        Self {
            shoulder_length: 10.0,
            elbow_length: 10.0,
        }
    }
}

/// Gear trains shared by both joints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearingSettings {
    /// Tooth counts of the large wheels
    pub a_train: Vec<u32>,
    /// Tooth counts of the pinions
    pub b_train: Vec<u32>,
    /// Motor steps per motor shaft revolution
    pub steps_per_motor_revolution: u64,
}

impl Default for GearingSettings {
    fn default() -> Self {
        Self {
            a_train: DEFAULT_A_TRAIN.to_vec(),
            b_train: DEFAULT_B_TRAIN.to_vec(),
            steps_per_motor_revolution: DEFAULT_STEPS_PER_MOTOR_REVOLUTION,
        }
    }
}

/// Path interpolation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterSettings {
    /// Maximum distance between interpolated waypoints
    pub step_size: f64,
}

impl Default for PlotterSettings {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Arm geometry
    pub arm: ArmSettings,
    /// Gear trains
    pub gearing: GearingSettings,
    /// Interpolation
    pub plotter: PlotterSettings,
    /// Pen actuation commands
    pub pen: PenProtocol,
    /// Serial connection
    pub connection: ConnectionParams,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, `<config dir>/plotarm/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, otherwise the default file when it exists,
    /// otherwise the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                tracing::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, length) in [
            ("arm.shoulder_length", self.arm.shoulder_length),
            ("arm.elbow_length", self.arm.elbow_length),
        ] {
            if !length.is_finite() || length <= 0.0 {
                return Err(ConfigError::out_of_range(key, length));
            }
        }

        for (key, train) in [
            ("gearing.a_train", &self.gearing.a_train),
            ("gearing.b_train", &self.gearing.b_train),
        ] {
            if train.is_empty() {
                return Err(ConfigError::Empty(key.to_string()));
            }
            if let Some(&teeth) = train.iter().find(|&&t| t == 0) {
                return Err(ConfigError::out_of_range(key, teeth));
            }
        }

        if self.gearing.steps_per_motor_revolution == 0 {
            return Err(ConfigError::out_of_range(
                "gearing.steps_per_motor_revolution",
                0,
            ));
        }
        if self.gear_ratio().is_err() {
            return Err(ConfigError::out_of_range(
                "gearing.a_train",
                format!("{:?}", self.gearing.a_train),
            ));
        }

        let step_size = self.plotter.step_size;
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(ConfigError::out_of_range("plotter.step_size", step_size));
        }

        let connection = &self.connection;
        if connection.baud_rate == 0 {
            return Err(ConfigError::out_of_range("connection.baud_rate", 0));
        }
        if !(5..=8).contains(&connection.data_bits) {
            return Err(ConfigError::out_of_range(
                "connection.data_bits",
                connection.data_bits,
            ));
        }
        if !matches!(connection.stop_bits, 1 | 2) {
            return Err(ConfigError::out_of_range(
                "connection.stop_bits",
                connection.stop_bits,
            ));
        }

        Ok(())
    }

    /// Gear ratio built from the configured trains
    pub fn gear_ratio(&self) -> SettingsResult<GearRatio> {
        Ok(GearRatio::from_trains(
            &self.gearing.a_train,
            &self.gearing.b_train,
            self.gearing.steps_per_motor_revolution,
        )?)
    }

    /// Solver for the configured arm, at its home position
    pub fn solver(&self) -> SettingsResult<TwoLinkSolver> {
        Ok(TwoLinkSolver::new(
            self.arm.shoulder_length,
            self.arm.elbow_length,
            self.gear_ratio()?,
        )?)
    }

    /// Interpolation settings
    pub fn interpolator_config(&self) -> SettingsResult<InterpolatorConfig> {
        Ok(InterpolatorConfig::new(self.plotter.step_size)?)
    }

    /// Pen actuation commands
    pub fn pen_protocol(&self) -> PenProtocol {
        self.pen.clone()
    }

    /// Serial connection parameters
    pub fn connection_params(&self) -> ConnectionParams {
        self.connection.clone()
    }

    /// Motion planner wired from every section
    pub fn planner(&self) -> SettingsResult<MotionPlanner> {
        Ok(MotionPlanner::new(
            self.solver()?,
            self.interpolator_config()?,
            self.pen_protocol(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.gear_ratio().unwrap(), GearRatio::default());
        assert_eq!(config.connection.baud_rate, 9600);
        assert_eq!(config.pen.drop.settle_ms, 700);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.arm.elbow_length = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "arm.elbow_length"
        ));

        let mut config = Config::default();
        config.gearing.b_train.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty("gearing.b_train".to_string()))
        );

        let mut config = Config::default();
        config.gearing.a_train[1] = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gearing.a_train = vec![u32::MAX, u32::MAX];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "gearing.a_train"
        ));
        assert!(config.solver().is_err());

        let mut config = Config::default();
        config.plotter.step_size = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.connection.stop_bits = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/config.toml")),
            Ok(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Ok(ConfigFormat::Json)
        );
        assert!(ConfigFormat::from_path(Path::new("config.yaml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[arm]\nshoulder_length = 12.5\n").unwrap();
        assert_eq!(config.arm.shoulder_length, 12.5);
        assert_eq!(config.arm.elbow_length, 10.0);
        assert_eq!(config.plotter, PlotterSettings::default());
    }

    #[test]
    fn test_domain_conversions() {
        let mut config = Config::default();
        config.arm.shoulder_length = 12.0;
        config.plotter.step_size = 0.25;

        let solver = config.solver().unwrap();
        assert_eq!(solver.shoulder_length(), 12.0);
        assert_eq!(config.interpolator_config().unwrap().step_size(), 0.25);

        config.arm.shoulder_length = -1.0;
        assert!(matches!(config.solver(), Err(SettingsError::Domain(_))));
    }
}

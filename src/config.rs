//! Configuration for the EfmIO daemon
//!
//! Loads configuration from a TOML file. Only deployment concerns live here:
//! serial device paths, the sensor backend, and logging. The sampling
//! parameters themselves (cycle length, refresh offsets, frame layout) are
//! compile-time constants and deliberately not configurable.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub link: LinkConfig,
    pub sensors: SensorsConfig,
    pub logging: LoggingConfig,
}

/// Serial link configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// Measurement link serial port (52-byte frames, back-to-back)
    pub frame_port: String,
    /// Measurement link baud rate
    #[serde(default = "default_frame_baud")]
    pub frame_baud: u32,
    /// Diagnostic text port; omit to route notices to the log instead
    #[serde(default)]
    pub diag_port: Option<String>,
    /// Diagnostic port baud rate
    #[serde(default = "default_diag_baud")]
    pub diag_baud: u32,
}

/// Sensor backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorsConfig {
    /// Backend selector; "sim" is the only built-in backend
    pub backend: String,
    /// Noise seed for the sim backend (0 = random each run)
    #[serde(default)]
    pub seed: u64,
    /// Analog converter data rate in Hz (paces the whole acquisition loop)
    #[serde(default = "default_analog_rate")]
    pub analog_rate_hz: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

fn default_frame_baud() -> u32 {
    115_200
}

fn default_diag_baud() -> u32 {
    19_200
}

fn default_analog_rate() -> f64 {
    20.0
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration running against the simulated sensor backend
    ///
    /// Suitable for testing and development. Deployments on the rotating
    /// module should use a proper TOML configuration file.
    pub fn sim_defaults() -> Self {
        Self {
            link: LinkConfig {
                frame_port: "/dev/ttyS1".to_string(),
                frame_baud: default_frame_baud(),
                diag_port: None,
                diag_baud: default_diag_baud(),
            },
            sensors: SensorsConfig {
                backend: "sim".to_string(),
                seed: 42,
                analog_rate_hz: default_analog_rate(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::sim_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::sim_defaults();
        assert_eq!(config.link.frame_port, "/dev/ttyS1");
        assert_eq!(config.link.frame_baud, 115_200);
        assert_eq!(config.link.diag_port, None);
        assert_eq!(config.sensors.backend, "sim");
        assert_eq!(config.sensors.analog_rate_hz, 20.0);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::sim_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        // Should contain all sections
        assert!(toml_string.contains("[link]"));
        assert!(toml_string.contains("[sensors]"));
        assert!(toml_string.contains("[logging]"));

        // Should contain key values
        assert!(toml_string.contains("frame_port = \"/dev/ttyS1\""));
        assert!(toml_string.contains("backend = \"sim\""));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[link]
frame_port = "/dev/ttyUSB0"
diag_port = "/dev/ttyUSB1"

[sensors]
backend = "sim"
seed = 7
analog_rate_hz = 50.0

[logging]
level = "debug"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.link.frame_port, "/dev/ttyUSB0");
        assert_eq!(config.link.diag_port.as_deref(), Some("/dev/ttyUSB1"));
        // Omitted baud rates fall back to the link defaults
        assert_eq!(config.link.frame_baud, 115_200);
        assert_eq!(config.link.diag_baud, 19_200);
        assert_eq!(config.sensors.seed, 7);
        assert_eq!(config.sensors.analog_rate_hz, 50.0);
        assert_eq!(config.logging.level, "debug");
    }
}

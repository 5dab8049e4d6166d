//! Error types for EfmIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// EfmIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration write error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Sensor failed to respond at start-up
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Malformed or misaligned frame
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Unknown sensor backend in configuration
    #[error("Unknown sensor backend: {0}")]
    UnknownBackend(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

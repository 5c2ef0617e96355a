//! Error types for the wakeplay orchestrator.
//!
//! Every variant that reaches a caller is fatal to the run that produced it.
//! Recoverable conditions (a failed service probe, a play request rejected
//! mid-transition) are handled where they occur and never become an `Error`.

use thiserror::Error;

use crate::radio::RadioState;

/// Primary error type for all orchestration operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Radio error: {0}")]
    Radio(#[from] RadioError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors while bringing the Bluetooth radio up.
#[derive(Error, Debug)]
pub enum RadioError {
    #[error("No Bluetooth radio found")]
    NoRadioFound,

    #[error("Failed to enable Bluetooth radio (state is {0})")]
    EnableFailed(RadioState),
}

/// Errors while locating or opening the target device.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device not found (name ~ '{name}', address {address})")]
    NotFound { name: String, address: String },

    #[error("Invalid hardware address '{0}': expected 6 bytes like AA:BB:CC:DD:EE:FF")]
    InvalidAddress(String),

    #[error("Opening device {0} returned no handle")]
    OpenFailed(String),
}

/// Errors raised by a platform backend.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` timed out")]
    Timeout { command: String },

    #[error("Unexpected output: {0}")]
    Parse(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a backend failure described by a message.
    pub fn backend(message: impl Into<String>) -> Self {
        Error::Platform(PlatformError::Backend(message.into()))
    }
}

//! Error types for the collaborator interfaces.
//!
//! The control loop never propagates these out of a cycle: a failed read
//! or write is logged and absorbed, and the cycle carries on sampling.

use thiserror_no_std::Error;

/// Failures reported by the serial transport collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport read failed: {details}")]
    Read { details: &'static str },
    #[error("transport write failed: {details}")]
    Write { details: &'static str },
}

/// Failures reported by the sensor panel collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor} read failed: {details}")]
    ReadFailed {
        sensor: &'static str,
        details: &'static str,
    },
}

/// Failures while decoding a persisted device configuration blob.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config blob could not be decoded")]
    Decode(#[from] postcard::Error),
}

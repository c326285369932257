//! Unified error types for upswatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The UPS status could not be read
    #[error("UPS status unavailable: {0}")]
    Source(#[from] SourceError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted state or queue could not be written
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Another invocation holds the run lock
    #[error("Another upswatch run is in progress ({owner}, lock {path})")]
    AlreadyRunning { owner: String, path: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the UPS status source
///
/// A crashed tool and a missing field are the same failure for control
/// flow; the variants only differ in what gets logged.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The status command could not be spawned
    #[error("failed to run '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// The status command exited unsuccessfully
    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// A required field was missing or could not be parsed
    #[error("field '{field}' {reason}")]
    Unavailable { field: String, reason: String },
}

impl SourceError {
    /// Build an `Unavailable` error for a missing field
    pub fn missing(field: &str) -> Self {
        Self::Unavailable {
            field: field.to_string(),
            reason: "is missing".to_string(),
        }
    }

    /// Build an `Unavailable` error for a field that failed to parse
    pub fn unparsable(field: &str, value: &str) -> Self {
        Self::Unavailable {
            field: field.to_string(),
            reason: format!("has unparsable value '{}'", value),
        }
    }
}

/// Errors from the persisted state store and pending queue
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create the directory holding the file
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the file
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an existing file
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a single notification channel
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Transport-level failure (DNS, connect, timeout)
    #[error("{channel}: request failed: {reason}")]
    Transport { channel: String, reason: String },

    /// The endpoint answered with a non-success status
    #[error("{channel}: rejected with HTTP {status}")]
    Rejected { channel: String, status: u16 },
}

/// Errors from the shutdown action
#[derive(Error, Debug)]
pub enum ActionError {
    /// The configured shutdown command is empty
    #[error("shutdown command is empty")]
    EmptyCommand,

    /// The shutdown command could not be spawned
    #[error("failed to run '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// The shutdown command exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: String },
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Battery charge outside 0-100
    #[error("Invalid battery charge: {0}% (must be 0-100)")]
    InvalidCharge(u32),

    /// Unrecognised persisted status token
    #[error("Invalid status token: {0}")]
    InvalidStatus(String),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

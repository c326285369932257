//! Alert system domain types
//!
//! Defines the alert kinds the transition detector can emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    /// Informational, no action needed
    Info,
    /// Attention recommended
    Warning,
    /// Immediate action taken or required
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Kind of transition detected between two polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// UPS switched from mains to battery
    EnterBattery,
    /// UPS switched from battery back to mains
    RestorePower,
    /// Battery charge crossed down through the critical threshold
    CriticalThreshold,
}

impl AlertKind {
    /// Severity reported for this kind
    pub const fn severity(&self) -> AlertSeverity {
        match self {
            Self::EnterBattery => AlertSeverity::Warning,
            Self::RestorePower => AlertSeverity::Info,
            Self::CriticalThreshold => AlertSeverity::Critical,
        }
    }

    /// Whether this kind requires the host to shut down
    pub const fn requires_shutdown(&self) -> bool {
        matches!(self, Self::CriticalThreshold)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnterBattery => write!(f, "ENTER_BATTERY"),
            Self::RestorePower => write!(f, "RESTORE_POWER"),
            Self::CriticalThreshold => write!(f, "CRITICAL_THRESHOLD"),
        }
    }
}

/// A detected transition and its human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// What happened
    pub kind: AlertKind,
    /// Message body, without host or timestamp decoration
    pub message: String,
}

impl AlertEvent {
    /// Create a new event
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Severity of the event
    pub fn severity(&self) -> AlertSeverity {
        self.kind.severity()
    }
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity(), self.kind, self.message)
    }
}

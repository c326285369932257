//! UPS status domain types
//!
//! `ups.status` from the NUT driver is a space-separated list of flags
//! such as `OL CHRG` or `OB LB`. Only the power source matters for
//! transition detection.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Power source the UPS is currently running from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UpsStatus {
    /// Running from mains (`OL`)
    OnLine,
    /// Running from battery (`OB`)
    OnBattery,
    /// Neither flag present, or no prior observation
    #[default]
    Unknown,
}

impl UpsStatus {
    /// Classify a raw `ups.status` flag list
    ///
    /// `OB` wins over `OL` if a driver ever reports both.
    pub fn from_flags(raw: &str) -> Self {
        let mut flags = raw.split_whitespace();
        if flags.clone().any(|f| f == "OB") {
            Self::OnBattery
        } else if flags.any(|f| f == "OL") {
            Self::OnLine
        } else {
            Self::Unknown
        }
    }

    /// Token used in the persisted state file
    pub const fn token(&self) -> &'static str {
        match self {
            Self::OnLine => "OL",
            Self::OnBattery => "OB",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::OnLine => "on line power",
            Self::OnBattery => "on battery",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for UpsStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OL" => Ok(Self::OnLine),
            "OB" => Ok(Self::OnBattery),
            "UNKNOWN" | "" => Ok(Self::Unknown),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

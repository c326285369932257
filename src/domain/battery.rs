//! Battery-related domain types

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Battery charge percentage (0-100)
///
/// Validated on construction to ensure the value is within valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BatteryCharge(u8);

impl BatteryCharge {
    /// Minimum valid charge
    pub const MIN: u8 = 0;
    /// Maximum valid charge
    pub const MAX: u8 = 100;

    /// Create a new BatteryCharge with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCharge` if value > 100
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value > Self::MAX as u32 {
            return Err(DomainError::InvalidCharge(value));
        }
        Ok(Self(value as u8))
    }

    /// Parse a charge reading as printed by the UPS driver
    ///
    /// Drivers report either `45` or `45.0`; fractional values are rounded.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<u32>() {
            return Self::new(value);
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| DomainError::InvalidValue(raw.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidValue(raw.to_string()));
        }
        Self::new(value.round() as u32)
    }

    /// Get the charge as a percentage value (0-100)
    #[inline]
    pub const fn as_percentage(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for BatteryCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u32> for BatteryCharge {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatteryCharge> for u32 {
    fn from(charge: BatteryCharge) -> Self {
        charge.0 as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_validation() {
        assert!(BatteryCharge::new(0).is_ok());
        assert!(BatteryCharge::new(100).is_ok());
        assert_eq!(
            BatteryCharge::new(101),
            Err(DomainError::InvalidCharge(101))
        );
    }

    #[test]
    fn test_charge_parse() {
        assert_eq!(BatteryCharge::parse("45").unwrap().as_percentage(), 45);
        assert_eq!(BatteryCharge::parse(" 97.6 ").unwrap().as_percentage(), 98);
        assert!(BatteryCharge::parse("abc").is_err());
        assert!(BatteryCharge::parse("-3").is_err());
        assert!(BatteryCharge::parse("250").is_err());
    }

    #[test]
    fn test_charge_display() {
        assert_eq!(BatteryCharge::new(18).unwrap().to_string(), "18%");
    }
}

//! Observed and persisted UPS state

use super::{BatteryCharge, UpsStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of the UPS taken by one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedState {
    /// Current power source
    pub status: UpsStatus,
    /// Current battery charge
    pub charge: BatteryCharge,
}

impl ObservedState {
    /// Create a new observation
    pub fn new(status: UpsStatus, charge: BatteryCharge) -> Self {
        Self { status, charge }
    }
}

impl fmt::Display for ObservedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.status, self.charge)
    }
}

/// Last successfully processed observation
///
/// `Default` is the "no prior run" sentinel: unknown status, no charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// Status seen by the previous run
    pub previous_status: UpsStatus,
    /// Charge seen by the previous run, if any
    pub previous_charge: Option<BatteryCharge>,
}

impl PersistedState {
    /// Whether this is the "no prior run" sentinel
    pub fn is_sentinel(&self) -> bool {
        *self == Self::default()
    }
}

impl From<ObservedState> for PersistedState {
    fn from(observed: ObservedState) -> Self {
        Self {
            previous_status: observed.status,
            previous_charge: Some(observed.charge),
        }
    }
}

impl fmt::Display for PersistedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.previous_charge {
            Some(charge) => write!(f, "({}, {})", self.previous_status, charge),
            None => write!(f, "({}, -)", self.previous_status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(PersistedState::default().is_sentinel());
        let observed = ObservedState::new(UpsStatus::OnLine, BatteryCharge::new(100).unwrap());
        assert!(!PersistedState::from(observed).is_sentinel());
    }

    #[test]
    fn test_from_observed() {
        let observed = ObservedState::new(UpsStatus::OnBattery, BatteryCharge::new(18).unwrap());
        let persisted = PersistedState::from(observed);
        assert_eq!(persisted.previous_status, UpsStatus::OnBattery);
        assert_eq!(persisted.previous_charge.map(|c| c.as_percentage()), Some(18));
        assert_eq!(persisted.to_string(), "(OB, 18%)");
    }
}

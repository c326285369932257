//! Transition detection
//!
//! Compares the previous run's state with the current poll and decides
//! which alerts fire. Every rule is edge-triggered: it fires on the poll
//! that enters a condition and stays quiet while the condition holds.

use super::types::{AlertEvent, AlertKind};
use crate::domain::{BatteryCharge, ObservedState, PersistedState, UpsStatus};

/// Thresholds used by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Charge at or below which the battery is critical
    pub battery_critical: BatteryCharge,
}

impl Thresholds {
    /// Create thresholds with the given critical charge
    pub fn new(battery_critical: BatteryCharge) -> Self {
        Self { battery_critical }
    }

    fn is_critical(&self, charge: BatteryCharge) -> bool {
        charge <= self.battery_critical
    }
}

/// Classify the change from `prev` to `curr`
///
/// Rules are evaluated in a fixed order and independently, so one poll can
/// emit both a status alert and a threshold alert. A missing previous
/// charge counts as above threshold.
pub fn detect(
    prev: &PersistedState,
    curr: &ObservedState,
    thresholds: &Thresholds,
) -> Vec<AlertEvent> {
    let mut events = Vec::new();

    match (prev.previous_status, curr.status) {
        (UpsStatus::OnBattery, UpsStatus::OnBattery) => {}
        (_, UpsStatus::OnBattery) => events.push(AlertEvent::new(
            AlertKind::EnterBattery,
            format!("UPS switched to battery power (battery {})", curr.charge),
        )),
        (UpsStatus::OnBattery, UpsStatus::OnLine) => events.push(AlertEvent::new(
            AlertKind::RestorePower,
            format!("Mains power restored (battery {})", curr.charge),
        )),
        (_, UpsStatus::OnLine | UpsStatus::Unknown) => {}
    }

    let was_critical = prev
        .previous_charge
        .is_some_and(|c| thresholds.is_critical(c));
    if thresholds.is_critical(curr.charge) && !was_critical {
        events.push(AlertEvent::new(
            AlertKind::CriticalThreshold,
            format!(
                "Battery critical at {} (threshold {})",
                curr.charge, thresholds.battery_critical
            ),
        ));
    }

    events
}

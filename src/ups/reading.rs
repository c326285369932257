//! Parsed `upsc` output

use crate::domain::{BatteryCharge, ObservedState, UpsStatus};
use crate::error::SourceError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Variable holding the battery charge percentage
pub const BATTERY_CHARGE: &str = "battery.charge";
/// Variable holding the status flag list
pub const UPS_STATUS: &str = "ups.status";

/// All variables reported by one `upsc` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpsReading {
    values: BTreeMap<String, String>,
}

impl UpsReading {
    /// Parse line-oriented `key: value` output
    ///
    /// Lines without a colon fall back to `key value`. Blank lines and
    /// lines without a key are skipped.
    pub fn parse(output: &str) -> Self {
        let mut values = BTreeMap::new();

        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (key, value) = match line.split_once(':') {
                Some((k, v)) => (k, v),
                None => line.split_once(char::is_whitespace).unwrap_or((line, "")),
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            values.insert(key.to_string(), value.trim().to_string());
        }

        Self { values }
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a variable, or `N/A` when absent
    pub fn display(&self, key: &str) -> String {
        self.get(key).unwrap_or("N/A").to_string()
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variables were parsed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Extract the fields needed for transition detection
    pub fn observe(&self) -> Result<ObservedState, SourceError> {
        let status_raw = self
            .get(UPS_STATUS)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SourceError::missing(UPS_STATUS))?;

        let charge_raw = self
            .get(BATTERY_CHARGE)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SourceError::missing(BATTERY_CHARGE))?;

        let charge = BatteryCharge::parse(charge_raw)
            .map_err(|_| SourceError::unparsable(BATTERY_CHARGE, charge_raw))?;

        Ok(ObservedState::new(UpsStatus::from_flags(status_raw), charge))
    }
}

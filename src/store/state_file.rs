//! Persisted previous-state record
//!
//! Format is two `key=value` lines:
//!
//! ```text
//! previous_status=OB
//! previous_battery=18
//! ```

use super::atomic::StagedWrite;
use crate::domain::{BatteryCharge, PersistedState, UpsStatus};
use crate::error::StoreError;
use std::path::{Path, PathBuf};

const KEY_STATUS: &str = "previous_status";
const KEY_BATTERY: &str = "previous_battery";

/// Key/value file holding the last processed observation
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous state
    ///
    /// Never fails: a missing or unreadable file yields the sentinel state,
    /// and individual bad values fall back to their sentinel.
    pub fn load(&self) -> PersistedState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No state file at {}", self.path.display());
                return PersistedState::default();
            }
            Err(e) => {
                log::warn!(
                    "Cannot read state file {}: {}; treating as first run",
                    self.path.display(),
                    e
                );
                return PersistedState::default();
            }
        };

        let state = Self::parse(&content);
        log::debug!("Loaded previous state {}", state);
        state
    }

    /// Parse file contents
    pub fn parse(content: &str) -> PersistedState {
        let mut state = PersistedState::default();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                KEY_STATUS => match value.parse::<UpsStatus>() {
                    Ok(status) => state.previous_status = status,
                    Err(e) => log::warn!("Ignoring persisted status: {}", e),
                },
                KEY_BATTERY if value.is_empty() => {}
                KEY_BATTERY => match value.parse::<u32>().map(BatteryCharge::new) {
                    Ok(Ok(charge)) => state.previous_charge = Some(charge),
                    _ => log::warn!("Ignoring persisted battery value '{}'", value),
                },
                _ => {}
            }
        }

        state
    }

    /// Render a state in file format
    pub fn render(state: &PersistedState) -> String {
        let battery = state
            .previous_charge
            .map(|c| c.as_percentage().to_string())
            .unwrap_or_default();
        format!(
            "{}={}\n{}={}\n",
            KEY_STATUS,
            state.previous_status.token(),
            KEY_BATTERY,
            battery
        )
    }

    /// Atomically replace the stored state
    pub fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        self.stage(state)?.commit()?;
        log::debug!("Saved state {} to {}", state, self.path.display());
        Ok(())
    }

    /// Write the new state next to the file without making it visible
    pub fn stage(&self, state: &PersistedState) -> Result<StagedWrite, StoreError> {
        StagedWrite::stage(&self.path, &Self::render(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ObservedState;

    fn observed(status: UpsStatus, charge: u32) -> PersistedState {
        ObservedState::new(status, BatteryCharge::new(charge).unwrap()).into()
    }

    #[test]
    fn test_missing_file_is_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state"));
        assert!(store.load().is_sentinel());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state"));
        let state = observed(UpsStatus::OnBattery, 18);

        store.save(&state).unwrap();

        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "previous_status=OB\nprevious_battery=18\n"
        );
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_sentinel_render() {
        assert_eq!(
            StateStore::render(&PersistedState::default()),
            "previous_status=UNKNOWN\nprevious_battery=\n"
        );
        assert!(StateStore::parse("previous_status=UNKNOWN\nprevious_battery=\n").is_sentinel());
    }

    #[test]
    fn test_parse_tolerates_garbage() {
        let state = StateStore::parse("junk\nprevious_status=OL\nprevious_battery=abc\nother=1\n");
        assert_eq!(state.previous_status, UpsStatus::OnLine);
        assert_eq!(state.previous_charge, None);
    }

    #[test]
    fn test_interrupted_save_keeps_prior_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state"));
        let prior = observed(UpsStatus::OnLine, 45);
        store.save(&prior).unwrap();

        // Temp file written, process killed before rename
        let staged = store.stage(&observed(UpsStatus::OnBattery, 18)).unwrap();
        drop(staged);

        assert_eq!(store.load(), prior);
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = StateStore::new(blocker.join("state"));
        assert!(store.save(&PersistedState::default()).is_err());
    }
}

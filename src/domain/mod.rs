//! Domain models for upswatch
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod battery;
pub mod state;
pub mod status;

pub use battery::BatteryCharge;
pub use state::{ObservedState, PersistedState};
pub use status::UpsStatus;

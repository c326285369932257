//! UPS status source
//!
//! Provides trait-based abstractions over the NUT `upsc` client for testability.

pub mod reading;
pub mod traits;
pub mod upsc;

pub use reading::{UpsReading, BATTERY_CHARGE, UPS_STATUS};
pub use traits::StatusSource;
pub use upsc::UpscSource;

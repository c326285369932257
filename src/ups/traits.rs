//! Trait definitions for UPS status sources
//!
//! These traits abstract over the status tool to enable testing with mocks.

use super::UpsReading;
use crate::domain::ObservedState;
use crate::error::SourceError;

/// Something that can report the current UPS state
///
/// Implementations do not retry; the scheduler re-invokes the monitor.
pub trait StatusSource {
    /// Read every variable the UPS exposes
    fn read(&self) -> Result<UpsReading, SourceError>;

    /// Poll the status and battery charge used for transition detection
    fn poll(&self) -> Result<ObservedState, SourceError> {
        self.read()?.observe()
    }

    /// Identifier used in log lines
    fn describe(&self) -> String;
}

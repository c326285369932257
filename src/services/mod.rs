//! Service layer for UPS monitoring
//!
//! Services encapsulate the business logic for a monitor invocation, the
//! shutdown decision and the run lock.

pub mod lock;
pub mod monitor;
pub mod shutdown_service;

pub use lock::RunLock;
pub use monitor::{Monitor, MonitorConfig, RunReport};
pub use shutdown_service::{CommandShutdown, HostShutdown, ShutdownOutcome, ShutdownService};

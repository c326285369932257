//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod config;
pub mod notify;
pub mod queue;
pub mod setup;
pub mod status;

pub use check::{run_check, run_watch};
pub use config::run_config;
pub use notify::run_notify_test;
pub use queue::run_queue;
pub use status::run_status;

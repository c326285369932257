//! upswatch - UPS battery watcher library
//!
//! This library provides the core functionality for watching a NUT-managed
//! UPS, raising edge-triggered alerts, delivering them through a durable
//! notification queue, and shutting the host down on a critical battery.
//!
//! # Modules
//!
//! - [`alerts`]: Transition detection, message formatting and delivery
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`services`]: Monitor loop, shutdown action and run lock
//! - [`store`]: Persisted state and pending queue files
//! - [`ups`]: UPS status source

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod store;
pub mod ups;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};

//! Command-line surface
//!
//! clap definitions for the `upswatch` binary and the table/JSON/compact
//! renderers shared by every command.

pub mod args;
pub mod output;

pub use args::{Cli, Commands, OutputFormat};

//! Status command implementation
//!
//! Shows UPS variables alongside the monitor's stored state.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, UpsStatusView};
use crate::commands::setup::build_source;
use crate::config::Config;
use crate::error::Result;
use crate::store::{PendingQueue, StateStore};
use crate::ups::StatusSource;

/// Execute the status command
pub fn run_status(config: &Config, format: OutputFormat) -> Result<()> {
    let source = build_source(config);
    let reading = source.read()?;

    let previous = StateStore::new(config.paths.state_file.clone()).load();
    let pending = PendingQueue::new(config.paths.queue_file.clone())
        .len()
        .unwrap_or_else(|e| {
            log::warn!("Cannot read pending queue: {}", e);
            0
        });

    let view = UpsStatusView::new(&config.ups.name, &reading, &previous, pending);
    print_output(&view, format)?;

    Ok(())
}

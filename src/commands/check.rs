//! Check and watch command implementation
//!
//! Runs monitoring passes under the run lock.

use crate::cli::args::{OutputFormat, WatchArgs};
use crate::cli::output::print_output;
use crate::commands::setup::build_monitor;
use crate::config::Config;
use crate::error::Result;
use crate::services::RunLock;

/// Execute a single monitoring pass
pub fn run_check(config: &Config, format: OutputFormat, dry_run: bool) -> Result<()> {
    let _lock = RunLock::acquire(&config.paths.lock_file)?;
    let mut monitor = build_monitor(config, dry_run, Some(1))?;

    let report = monitor.run_once()?;
    print_output(&report, format)?;

    Ok(())
}

/// Execute monitoring passes in a loop
///
/// `args.interval` is merged into `config` before this is called.
pub fn run_watch(config: &Config, args: &WatchArgs, dry_run: bool) -> Result<()> {
    let _lock = RunLock::acquire(&config.paths.lock_file)?;
    let mut monitor = build_monitor(config, dry_run, args.count)?;

    log::info!("Starting watch loop");
    log::info!("  UPS: {}", config.ups.name);
    log::info!("  Interval: {:?}", monitor.config().interval);
    log::info!("  Threshold: {}", monitor.config().thresholds.battery_critical);
    log::info!("  Dry run: {}", dry_run);

    monitor.run()
}

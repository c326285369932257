//! Queue command implementation
//!
//! Lists, flushes or clears pending notifications.

use crate::alerts::FlushOutcome;
use crate::cli::args::{OutputFormat, QueueCommands};
use crate::cli::output::{print_output, Message, QueueList};
use crate::commands::setup::build_dispatcher;
use crate::config::Config;
use crate::error::Result;
use crate::services::RunLock;
use crate::store::PendingQueue;

/// Execute queue commands
pub fn run_queue(
    command: &QueueCommands,
    config: &Config,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    match command {
        QueueCommands::List => run_queue_list(config, format),
        QueueCommands::Flush => run_queue_flush(config, format, dry_run),
        QueueCommands::Clear => run_queue_clear(config, format, dry_run),
    }
}

fn run_queue_list(config: &Config, format: OutputFormat) -> Result<()> {
    let queue = PendingQueue::new(config.paths.queue_file.clone());
    let list = QueueList {
        path: queue.path().display().to_string(),
        messages: queue.load()?,
    };
    print_output(&list, format)?;
    Ok(())
}

fn run_queue_flush(config: &Config, format: OutputFormat, dry_run: bool) -> Result<()> {
    let _lock = RunLock::acquire(&config.paths.lock_file)?;
    let dispatcher = build_dispatcher(config, dry_run);

    let message = match dispatcher.flush_pending() {
        FlushOutcome::Empty => Message {
            message: "No pending notifications".to_string(),
            success: true,
        },
        FlushOutcome::Delivered { count } => Message {
            message: format!("Delivered {} pending notification(s)", count),
            success: true,
        },
        FlushOutcome::Skipped { pending } => Message {
            message: format!("DRY RUN: Would flush {} pending notification(s)", pending),
            success: true,
        },
        FlushOutcome::Offline { pending } => Message {
            message: format!("Offline, {} notification(s) still pending", pending),
            success: false,
        },
        FlushOutcome::Failed { pending } => Message {
            message: format!("Delivery failed, {} notification(s) still pending", pending),
            success: false,
        },
        FlushOutcome::StoreFailed => Message {
            message: "Pending queue could not be read or cleared".to_string(),
            success: false,
        },
    };

    print_output(&message, format)?;
    Ok(())
}

fn run_queue_clear(config: &Config, format: OutputFormat, dry_run: bool) -> Result<()> {
    let _lock = RunLock::acquire(&config.paths.lock_file)?;
    let queue = PendingQueue::new(config.paths.queue_file.clone());
    let count = queue.len()?;

    let message = if dry_run {
        format!("DRY RUN: Would discard {} pending notification(s)", count)
    } else {
        queue.clear()?;
        log::info!("Discarded {} pending notification(s)", count);
        format!("Discarded {} pending notification(s)", count)
    };

    print_output(
        &Message {
            message,
            success: true,
        },
        format,
    )?;
    Ok(())
}

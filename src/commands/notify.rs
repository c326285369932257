//! Notify-test command implementation

use crate::alerts::{DispatchOutcome, MessageFormatter};
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::commands::setup::build_dispatcher;
use crate::config::Config;
use crate::error::Result;
use crate::services::RunLock;

/// Send a test message through the full dispatch path
///
/// A failed send is queued like any other notification.
pub fn run_notify_test(
    text: &str,
    config: &Config,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    let _lock = RunLock::acquire(&config.paths.lock_file)?;
    let dispatcher = build_dispatcher(config, dry_run);
    let formatter = MessageFormatter::new(config.host_label());

    let message = match dispatcher.dispatch(&formatter.text(text)) {
        DispatchOutcome::Sent => Message {
            message: format!("Sent to {} channel(s)", dispatcher.notifier_count()),
            success: true,
        },
        DispatchOutcome::Queued => Message {
            message: format!(
                "Delivery failed, queued in {}",
                dispatcher.queue().path().display()
            ),
            success: false,
        },
        DispatchOutcome::Dropped => Message {
            message: "Delivery failed and the message could not be queued".to_string(),
            success: false,
        },
        DispatchOutcome::Skipped => Message {
            message: "DRY RUN: Would send test notification".to_string(),
            success: true,
        },
    };

    print_output(&message, format)?;
    Ok(())
}

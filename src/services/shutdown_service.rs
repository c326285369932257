//! Host shutdown service
//!
//! Halts the host when the battery goes critical. Runs whether or not the
//! notification got out: losing power does not depend on the network.

use crate::alerts::AlertEvent;
use crate::error::ActionError;
use serde::Serialize;
use std::process::Command;

/// Host-level "halt now" mechanism
pub trait HostShutdown {
    /// Halt the host
    fn halt(&self) -> Result<(), ActionError>;

    /// Description used in log lines
    fn describe(&self) -> String;
}

/// Halts the host by running a command such as `shutdown -h now`
#[derive(Debug, Clone)]
pub struct CommandShutdown {
    argv: Vec<String>,
}

impl CommandShutdown {
    /// Create from an argv list
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl HostShutdown for CommandShutdown {
    fn halt(&self) -> Result<(), ActionError> {
        let (program, args) = self.argv.split_first().ok_or(ActionError::EmptyCommand)?;

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| ActionError::Spawn {
                command: self.describe(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ActionError::Failed {
                command: self.describe(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.argv.join(" ")
    }
}

/// What the service did with a batch of events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShutdownOutcome {
    /// No event called for a shutdown
    NotRequired,
    /// A shutdown was called for but is disabled in configuration
    Disabled,
    /// Dry run; the command was not executed
    DryRun,
    /// The shutdown command ran successfully
    Invoked,
    /// The shutdown command failed; not retried
    Failed,
}

/// Service deciding whether to halt the host
pub struct ShutdownService {
    action: Box<dyn HostShutdown>,
    enabled: bool,
    dry_run: bool,
}

impl ShutdownService {
    /// Create a new shutdown service
    pub fn new(action: Box<dyn HostShutdown>, enabled: bool, dry_run: bool) -> Self {
        Self {
            action,
            enabled,
            dry_run,
        }
    }

    /// Halt the host if any event requires it
    ///
    /// Failures are logged and not retried.
    pub fn maybe_shutdown(&self, events: &[AlertEvent]) -> ShutdownOutcome {
        let Some(trigger) = events.iter().find(|e| e.kind.requires_shutdown()) else {
            return ShutdownOutcome::NotRequired;
        };

        if !self.enabled {
            log::warn!("{} but shutdown is disabled", trigger.kind);
            return ShutdownOutcome::Disabled;
        }

        if self.dry_run {
            log::info!("DRY RUN: Would run '{}'", self.action.describe());
            return ShutdownOutcome::DryRun;
        }

        log::warn!("{}: running '{}'", trigger.kind, self.action.describe());
        match self.action.halt() {
            Ok(()) => {
                log::warn!("Shutdown initiated");
                ShutdownOutcome::Invoked
            }
            Err(e) => {
                log::error!("Shutdown failed: {}", e);
                ShutdownOutcome::Failed
            }
        }
    }

    /// Check if in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

//! Notification dispatch with durable retry
//!
//! Manages the configured channels, gates every send on a connectivity
//! probe, and falls back to the pending queue when delivery fails.
//! Nothing in here returns an error to the caller.

use super::notifier::Notifier;
use super::probe::ConnectivityProbe;
use crate::store::PendingQueue;
use serde::Serialize;
use std::cell::OnceCell;

/// Result of flushing the pending queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlushOutcome {
    /// Nothing was queued
    Empty,
    /// The probe failed; nothing was attempted
    Offline { pending: usize },
    /// Every queued message reached every channel and the queue was cleared
    Delivered { count: usize },
    /// A send failed; the queue was left as it was
    Failed { pending: usize },
    /// The queue file could not be read or cleared
    StoreFailed,
    /// Dry run; nothing was attempted
    Skipped { pending: usize },
}

/// Result of dispatching one new message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DispatchOutcome {
    /// Every channel accepted the message
    Sent,
    /// The message was appended to the pending queue
    Queued,
    /// Delivery failed and the message could not be queued either
    Dropped,
    /// Dry run; nothing was attempted
    Skipped,
}

/// Delivers messages to every channel, queuing on failure
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
    probe: Box<dyn ConnectivityProbe>,
    queue: PendingQueue,
    dry_run: bool,
    online: OnceCell<bool>,
}

impl Dispatcher {
    /// Create a dispatcher
    ///
    /// The probe runs at most once until `reset_probe` is called.
    pub fn new(probe: Box<dyn ConnectivityProbe>, queue: PendingQueue) -> Self {
        Self {
            channels: Vec::new(),
            probe,
            queue,
            dry_run: false,
            online: OnceCell::new(),
        }
    }

    /// Add a channel
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.channels.push(notifier);
    }

    /// Evaluate without sending or queuing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Get number of configured channels
    pub fn notifier_count(&self) -> usize {
        self.channels.len()
    }

    /// The pending queue
    pub fn queue(&self) -> &PendingQueue {
        &self.queue
    }

    /// Forget the cached probe result before a new invocation
    pub fn reset_probe(&mut self) {
        self.online = OnceCell::new();
    }

    fn is_online(&self) -> bool {
        *self.online.get_or_init(|| self.probe.is_online())
    }

    /// Send `message` to every channel
    ///
    /// A failing channel does not stop the others; the result is true only
    /// when every channel accepted the message.
    fn send_all(&self, message: &str) -> bool {
        let mut delivered = true;
        for channel in &self.channels {
            match channel.send(message) {
                Ok(()) => log::debug!("Delivered via {}", channel.name()),
                Err(e) => {
                    log::warn!("Failed to notify via {}: {}", channel.name(), e);
                    delivered = false;
                }
            }
        }
        delivered
    }

    /// Try to deliver everything in the pending queue
    ///
    /// All-or-nothing: the queue is cleared only when every message reached
    /// every channel, so a failure part way through means already-delivered
    /// messages are sent again on the next flush.
    pub fn flush_pending(&self) -> FlushOutcome {
        let pending = match self.queue.load() {
            Ok(p) => p,
            Err(e) => {
                log::error!("Cannot read pending queue: {}", e);
                return FlushOutcome::StoreFailed;
            }
        };

        if pending.is_empty() {
            log::debug!("Pending queue empty");
            return FlushOutcome::Empty;
        }

        if self.dry_run {
            log::info!("Dry run: would flush {} pending message(s)", pending.len());
            return FlushOutcome::Skipped {
                pending: pending.len(),
            };
        }

        if !self.is_online() {
            log::info!("Offline: keeping {} pending message(s)", pending.len());
            return FlushOutcome::Offline {
                pending: pending.len(),
            };
        }

        for (i, message) in pending.iter().enumerate() {
            if !self.send_all(message) {
                log::warn!(
                    "Flush stopped at message {}/{}; keeping {} pending message(s)",
                    i + 1,
                    pending.len(),
                    pending.len()
                );
                return FlushOutcome::Failed {
                    pending: pending.len(),
                };
            }
        }

        if let Err(e) = self.queue.clear() {
            log::error!("Delivered pending messages but cannot clear queue: {}", e);
            return FlushOutcome::StoreFailed;
        }

        log::info!("Flushed {} pending message(s)", pending.len());
        FlushOutcome::Delivered {
            count: pending.len(),
        }
    }

    /// Deliver a new message, or queue it for the next run
    ///
    /// A message is either sent or queued, never both.
    pub fn dispatch(&self, message: &str) -> DispatchOutcome {
        if self.dry_run {
            log::info!("Dry run: would send '{}'", message);
            return DispatchOutcome::Skipped;
        }

        if self.is_online() {
            if self.send_all(message) {
                log::info!("Notification sent to {} channel(s)", self.channels.len());
                return DispatchOutcome::Sent;
            }
        } else {
            log::info!("Offline: queuing notification");
        }

        match self.queue.append(message) {
            Ok(()) => {
                log::info!("Notification queued in {}", self.queue.path().display());
                DispatchOutcome::Queued
            }
            Err(e) => {
                log::error!("Notification lost, cannot queue it: {}", e);
                DispatchOutcome::Dropped
            }
        }
    }
}

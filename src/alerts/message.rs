//! Message decoration
//!
//! Queued messages may be delivered hours later, so every message carries
//! the host it came from and the time it was generated.

use super::types::AlertEvent;
use chrono::{DateTime, Utc};

/// Formats alert events into channel text
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    host: String,
}

impl MessageFormatter {
    /// Create a formatter labelling messages with `host`
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Format an event generated now
    pub fn event(&self, event: &AlertEvent) -> String {
        self.event_at(event, Utc::now())
    }

    /// Format an event generated at `at`
    pub fn event_at(&self, event: &AlertEvent, at: DateTime<Utc>) -> String {
        format!(
            "[{}] {}: {} ({})",
            self.host,
            event.severity(),
            event.message,
            at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }

    /// Format free text generated now
    pub fn text(&self, text: &str) -> String {
        format!(
            "[{}] {} ({})",
            self.host,
            text,
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Best-effort host name for message labels
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

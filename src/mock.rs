//! Mock implementations for testing
//!
//! Provides a mock UPS, notification channel, connectivity probe and
//! shutdown action for unit testing without hardware or network.

use crate::alerts::{ConnectivityProbe, Notifier};
use crate::error::{ActionError, ChannelError, SourceError};
use crate::services::HostShutdown;
use crate::ups::{StatusSource, UpsReading};

use std::sync::{Arc, Mutex};

/// Mock UPS whose `upsc` output can be changed between polls
#[derive(Debug, Clone)]
pub struct MockSource {
    output: Arc<Mutex<Option<String>>>,
}

impl MockSource {
    /// Create a source reporting `status` and `charge`
    pub fn new(status: &str, charge: u32) -> Self {
        let source = Self {
            output: Arc::new(Mutex::new(None)),
        };
        source.set(status, charge);
        source
    }

    /// Change the reported status and charge
    pub fn set(&self, status: &str, charge: u32) {
        self.set_output(&format!(
            "battery.charge: {}\nbattery.voltage: 13.5\nups.status: {}\nups.load: 10\n",
            charge, status
        ));
    }

    /// Replace the raw output
    pub fn set_output(&self, output: &str) {
        *self.output.lock().unwrap() = Some(output.to_string());
    }

    /// Make the next polls fail as if `upsc` could not run
    pub fn set_unavailable(&self) {
        *self.output.lock().unwrap() = None;
    }
}

impl StatusSource for MockSource {
    fn read(&self) -> Result<UpsReading, SourceError> {
        match self.output.lock().unwrap().as_deref() {
            Some(output) => Ok(UpsReading::parse(output)),
            None => Err(SourceError::Spawn {
                command: "upsc mock".to_string(),
                reason: "not found".to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[derive(Debug, Default)]
struct NotifierState {
    sent: Vec<String>,
    attempts: usize,
    fail_after: Option<usize>,
}

/// Mock notification channel recording what it was sent
#[derive(Debug, Clone)]
pub struct MockNotifier {
    name: String,
    state: Arc<Mutex<NotifierState>>,
}

impl MockNotifier {
    /// Create a channel that accepts everything
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(NotifierState::default())),
        }
    }

    /// Create a channel that rejects everything
    pub fn failing(name: &str) -> Self {
        let notifier = Self::new(name);
        notifier.fail_after(0);
        notifier
    }

    /// Accept `count` more messages, then reject
    pub fn fail_after(&self, count: usize) {
        let mut state = self.state.lock().unwrap();
        state.fail_after = Some(state.sent.len() + count);
    }

    /// Accept everything again
    pub fn recover(&self) {
        self.state.lock().unwrap().fail_after = None;
    }

    /// Messages accepted so far
    pub fn sent(&self) -> Vec<String> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Number of send attempts, successful or not
    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }
}

impl Notifier for MockNotifier {
    fn send(&self, message: &str) -> Result<(), ChannelError> {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        let limit = state.fail_after;
        if limit.is_some_and(|l| state.sent.len() >= l) {
            return Err(ChannelError::Rejected {
                channel: self.name.clone(),
                status: 503,
            });
        }
        state.sent.push(message.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Mock connectivity probe
#[derive(Debug, Clone)]
pub struct MockProbe {
    online: Arc<Mutex<bool>>,
    calls: Arc<Mutex<usize>>,
}

impl MockProbe {
    /// Create a probe with a fixed answer
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(Mutex::new(online)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Change the answer
    pub fn set_online(&self, online: bool) {
        *self.online.lock().unwrap() = online;
    }

    /// Number of times the probe ran
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ConnectivityProbe for MockProbe {
    fn is_online(&self) -> bool {
        *self.calls.lock().unwrap() += 1;
        *self.online.lock().unwrap()
    }
}

/// Mock shutdown action counting invocations
#[derive(Debug, Clone, Default)]
pub struct MockShutdown {
    calls: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockShutdown {
    /// Create an action that succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an action that fails
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(Mutex::new(0)),
            fail: true,
        }
    }

    /// Number of times the host was halted
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl HostShutdown for MockShutdown {
    fn halt(&self) -> Result<(), ActionError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(ActionError::Failed {
                command: "mock".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "mock shutdown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpsStatus;

    #[test]
    fn test_mock_source() {
        let source = MockSource::new("OL", 100);
        assert_eq!(source.poll().unwrap().status, UpsStatus::OnLine);

        source.set("OB", 40);
        let observed = source.poll().unwrap();
        assert_eq!(observed.status, UpsStatus::OnBattery);
        assert_eq!(observed.charge.as_percentage(), 40);

        source.set_unavailable();
        assert!(source.poll().is_err());
    }

    #[test]
    fn test_mock_notifier_fail_after() {
        let notifier = MockNotifier::new("test");
        notifier.fail_after(1);
        assert!(notifier.send("a").is_ok());
        assert!(notifier.send("b").is_err());
        notifier.recover();
        assert!(notifier.send("c").is_ok());
        assert_eq!(notifier.sent(), vec!["a", "c"]);
        assert_eq!(notifier.attempts(), 3);
    }

    #[test]
    fn test_mock_probe_counts_calls() {
        let probe = MockProbe::new(false);
        assert!(!probe.is_online());
        probe.set_online(true);
        assert!(probe.is_online());
        assert_eq!(probe.calls(), 2);
    }
}

//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::domain::PersistedState;
use crate::services::RunReport;
use crate::ups::UpsReading;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// UPS status display
#[derive(Debug, Clone, Serialize)]
pub struct UpsStatusView {
    pub ups: String,
    pub battery_charge: String,
    pub battery_voltage: String,
    pub input_voltage: String,
    pub output_voltage: String,
    pub status: String,
    pub load: String,
    pub ups_type: String,
    pub driver_version: String,
    pub previous_state: String,
    pub pending_notifications: usize,
}

impl UpsStatusView {
    /// Build from a reading and the monitor's stored state
    pub fn new(ups: &str, reading: &UpsReading, previous: &PersistedState, pending: usize) -> Self {
        Self {
            ups: ups.to_string(),
            battery_charge: with_unit(reading, "battery.charge", "%"),
            battery_voltage: with_unit(reading, "battery.voltage", "V"),
            input_voltage: with_unit(reading, "input.voltage", "V"),
            output_voltage: with_unit(reading, "output.voltage", "V"),
            status: reading.display("ups.status"),
            load: with_unit(reading, "ups.load", "%"),
            ups_type: reading.display("ups.type"),
            driver_version: reading.display("driver.version"),
            previous_state: previous.to_string(),
            pending_notifications: pending,
        }
    }
}

fn with_unit(reading: &UpsReading, key: &str, unit: &str) -> String {
    match reading.get(key) {
        Some(value) => format!("{}{}", value, unit),
        None => "N/A".to_string(),
    }
}

impl TableDisplay for UpsStatusView {
    fn to_table(&self) -> String {
        format!(
            "UPS {}\n  Battery Charge: {}\n  Battery Voltage: {}\n  Input Voltage: {}\n  Output Voltage: {}\n  UPS Status: {}\n  UPS Load: {}\n  UPS Type: {}\n  Driver Version: {}\n  Previous State: {}\n  Pending Notifications: {}",
            self.ups,
            self.battery_charge,
            self.battery_voltage,
            self.input_voltage,
            self.output_voltage,
            self.status,
            self.load,
            self.ups_type,
            self.driver_version,
            self.previous_state,
            self.pending_notifications
        )
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} {} pending={}",
            self.ups, self.status, self.battery_charge, self.pending_notifications
        )
    }
}

impl TableDisplay for RunReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Previous: {}\nCurrent: {}\nQueue flush: {:?}\n",
            self.previous, self.observed, self.flush
        );

        if self.events.is_empty() {
            output.push_str("Alerts: none\n");
        } else {
            output.push_str("Alerts:\n");
            for (event, delivery) in self.events.iter().zip(&self.deliveries) {
                output.push_str(&format!("  {} ({:?})\n", event, delivery));
            }
        }

        output.push_str(&format!(
            "Shutdown: {:?}\nState saved: {}",
            self.shutdown, self.state_saved
        ));
        output
    }

    fn to_compact(&self) -> String {
        let kinds: Vec<String> = self.events.iter().map(|e| e.kind.to_string()).collect();
        format!(
            "{} -> {} alerts=[{}] shutdown={:?}",
            self.previous,
            self.observed,
            kinds.join(","),
            self.shutdown
        )
    }
}

/// Pending queue display
#[derive(Debug, Clone, Serialize)]
pub struct QueueList {
    pub path: String,
    pub messages: Vec<String>,
}

impl TableDisplay for QueueList {
    fn to_table(&self) -> String {
        if self.messages.is_empty() {
            return format!("No pending notifications ({})", self.path);
        }

        let mut output = format!(
            "{} pending notification(s) in {}\n",
            self.messages.len(),
            self.path
        );
        for (i, message) in self.messages.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, message));
        }
        output.trim_end().to_string()
    }

    fn to_compact(&self) -> String {
        format!("pending={}", self.messages.len())
    }
}

impl TableDisplay for Config {
    fn to_table(&self) -> String {
        self.to_toml()
            .unwrap_or_else(|e| format!("# cannot render configuration: {}", e))
            .trim_end()
            .to_string()
    }

    fn to_compact(&self) -> String {
        format!(
            "ups={} threshold={}% interval={}s discord={} telegram={} shutdown={}",
            self.ups.name,
            self.thresholds.battery_critical,
            self.general.interval_seconds,
            self.discord_webhook().is_some(),
            self.telegram_credentials().is_some(),
            self.shutdown.enabled
        )
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertEvent, AlertKind, DispatchOutcome, FlushOutcome};
    use crate::domain::{BatteryCharge, ObservedState, UpsStatus};
    use crate::services::ShutdownOutcome;

    #[test]
    fn test_status_view_missing_fields() {
        let reading = UpsReading::parse("battery.charge: 87\nups.status: OL CHRG\n");
        let view = UpsStatusView::new("nutdev1", &reading, &PersistedState::default(), 0);

        let table = view.to_table();
        assert!(table.contains("Battery Charge: 87%"));
        assert!(table.contains("Input Voltage: N/A\n"));
        assert!(table.contains("Previous State: (UNKNOWN, -)"));
        assert_eq!(view.to_compact(), "nutdev1: OL CHRG 87% pending=0");
    }

    #[test]
    fn test_run_report_table() {
        let report = RunReport {
            flush: FlushOutcome::Empty,
            previous: PersistedState::default(),
            observed: ObservedState::new(UpsStatus::OnBattery, BatteryCharge::new(18).unwrap()),
            events: vec![AlertEvent::new(AlertKind::EnterBattery, "on battery")],
            deliveries: vec![DispatchOutcome::Queued],
            shutdown: ShutdownOutcome::NotRequired,
            state_saved: true,
        };

        let table = report.to_table();
        assert!(table.contains("WARNING ENTER_BATTERY: on battery (Queued)"));
        assert!(report.to_compact().contains("alerts=[ENTER_BATTERY]"));
        assert!(serde_json::to_string(&report).unwrap().contains("\"state_saved\":true"));
    }

    #[test]
    fn test_queue_list_table() {
        let list = QueueList {
            path: "/var/lib/upswatch/pending".to_string(),
            messages: vec!["a".to_string(), "b".to_string()],
        };
        assert!(list.to_table().contains("  2. b"));
        assert_eq!(list.to_compact(), "pending=2");
    }

    #[test]
    fn test_config_compact() {
        let config = Config::default();
        let compact = config.to_compact();
        assert!(compact.starts_with("ups=nutdev1 threshold=20%"));
        assert!(compact.contains("discord=false"));
        assert!(config.to_table().contains("[thresholds]"));
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Operation completed".to_string(),
            success: true,
        };

        assert!(msg.to_table().starts_with('✓'));
    }
}

//! Alert detection and notification
//!
//! Provides edge-triggered transition detection and delivery to webhook
//! channels with a durable retry queue.

mod detector;
mod dispatcher;
mod message;
mod notifier;
mod probe;
mod types;

pub use detector::{detect, Thresholds};
pub use dispatcher::{DispatchOutcome, Dispatcher, FlushOutcome};
pub use message::{local_hostname, MessageFormatter};
pub use notifier::{DiscordNotifier, Notifier, TelegramNotifier};
pub use probe::{ConnectivityProbe, TcpProbe};
pub use types::{AlertEvent, AlertKind, AlertSeverity};

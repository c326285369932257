//! Configuration system
//!
//! Handles TOML config file parsing and CLI/environment merging. The
//! resulting `Config` is built once at startup and passed by reference.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::{TelegramNotifier, Thresholds};
use crate::domain::BatteryCharge;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// UPS selection
    pub ups: UpsConfig,
    /// Alert thresholds
    pub thresholds: ThresholdConfig,
    /// State, queue and lock file locations
    pub paths: PathsConfig,
    /// Connectivity probe and send timeouts
    pub network: NetworkConfig,
    /// Discord channel
    pub discord: DiscordConfig,
    /// Telegram channel
    pub telegram: TelegramConfig,
    /// Shutdown action
    pub shutdown: ShutdownConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Watch loop interval in seconds
    pub interval_seconds: u64,
    /// Host label used in messages (defaults to the system hostname)
    pub hostname: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            hostname: None,
        }
    }
}

/// UPS selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpsConfig {
    /// UPS identifier passed to upsc (`name` or `name@host`)
    pub name: String,
    /// Status command
    pub command: String,
}

impl Default for UpsConfig {
    fn default() -> Self {
        Self {
            name: "nutdev1".to_string(),
            command: "upsc".to_string(),
        }
    }
}

/// Threshold configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Charge percentage at or below which the host shuts down
    pub battery_critical: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            battery_critical: 20,
        }
    }
}

impl ThresholdConfig {
    /// Convert to detector thresholds
    pub fn to_thresholds(&self) -> Result<Thresholds, ConfigError> {
        let charge =
            BatteryCharge::new(self.battery_critical).map_err(|e| ConfigError::InvalidValue {
                key: "thresholds.battery_critical".to_string(),
                message: e.to_string(),
            })?;
        Ok(Thresholds::new(charge))
    }
}

/// File location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Persisted previous state
    pub state_file: PathBuf,
    /// Pending notification queue
    pub queue_file: PathBuf,
    /// Run lock
    pub lock_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let dir = default_state_dir();
        Self {
            state_file: dir.join("state"),
            queue_file: dir.join("pending"),
            lock_file: dir.join("upswatch.lock"),
        }
    }
}

/// Default directory for state files
pub fn default_state_dir() -> PathBuf {
    dirs::state_dir()
        .unwrap_or_else(|| PathBuf::from("/var/lib"))
        .join("upswatch")
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// `host:port` probed before any send
    pub probe_host: String,
    /// Probe connect timeout in seconds
    pub probe_timeout_secs: u64,
    /// Per-channel send timeout in seconds
    pub send_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_host: "1.1.1.1:53".to_string(),
            probe_timeout_secs: 5,
            send_timeout_secs: 10,
        }
    }
}

impl NetworkConfig {
    /// Probe timeout
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Send timeout
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

/// Discord configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscordConfig {
    /// Webhook URL
    pub webhook_url: Option<String>,
}

/// Telegram configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token
    pub bot_token: Option<String>,
    /// Target chat
    pub chat_id: Option<String>,
    /// Bot API base URL
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: TelegramNotifier::DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Shutdown configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Whether a critical battery halts the host
    pub enabled: bool,
    /// Command and arguments
    pub command: Vec<String>,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["shutdown".to_string(), "-h".to_string(), "now".to_string()],
        }
    }
}

const MASK: &str = "********";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Check required settings
    ///
    /// At least one channel must be configured, and Telegram needs both
    /// its token and chat id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let discord = non_empty(&self.discord.webhook_url).is_some();
        let token = non_empty(&self.telegram.bot_token).is_some();
        let chat = non_empty(&self.telegram.chat_id).is_some();

        match (token, chat) {
            (true, false) => return Err(ConfigError::MissingField("telegram.chat_id".to_string())),
            (false, true) => {
                return Err(ConfigError::MissingField("telegram.bot_token".to_string()))
            }
            _ => {}
        }

        if !discord && !token {
            return Err(ConfigError::MissingField(
                "discord.webhook_url or telegram.bot_token".to_string(),
            ));
        }

        if self.ups.name.trim().is_empty() {
            return Err(ConfigError::MissingField("ups.name".to_string()));
        }

        self.thresholds.to_thresholds()?;

        if self.shutdown.enabled && self.shutdown.command.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "shutdown.command".to_string(),
                message: "must not be empty when shutdown is enabled".to_string(),
            });
        }

        if self.general.interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "general.interval_seconds".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Discord webhook URL, if configured
    pub fn discord_webhook(&self) -> Option<&str> {
        non_empty(&self.discord.webhook_url)
    }

    /// Telegram token and chat id, if both are configured
    pub fn telegram_credentials(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(&self.telegram.bot_token)?,
            non_empty(&self.telegram.chat_id)?,
        ))
    }

    /// Host label for messages
    pub fn host_label(&self) -> String {
        non_empty(&self.general.hostname)
            .map(str::to_string)
            .unwrap_or_else(crate::alerts::local_hostname)
    }

    /// Copy with secrets replaced, for display
    pub fn masked(&self) -> Self {
        let mut config = self.clone();
        if config.discord.webhook_url.is_some() {
            config.discord.webhook_url = Some(MASK.to_string());
        }
        if config.telegram.bot_token.is_some() {
            config.telegram.bot_token = Some(MASK.to_string());
        }
        config
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_discord() -> Config {
        let mut config = Config::default();
        config.discord.webhook_url = Some("https://discord.example/hook".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ups.name, "nutdev1");
        assert_eq!(config.thresholds.battery_critical, 20);
        assert_eq!(config.network.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.network.send_timeout(), Duration::from_secs(10));
        assert_eq!(config.shutdown.command, vec!["shutdown", "-h", "now"]);
        assert!(config.paths.state_file.ends_with("upswatch/state"));
    }

    #[test]
    fn test_validate_requires_a_channel() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
        assert!(with_discord().validate().is_ok());
    }

    #[test]
    fn test_validate_blank_webhook_is_missing() {
        let mut config = Config::default();
        config.discord.webhook_url = Some("  ".to_string());
        assert!(config.validate().is_err());
        assert!(config.discord_webhook().is_none());
    }

    #[test]
    fn test_validate_telegram_pairs() {
        let mut config = Config::default();
        config.telegram.bot_token = Some("123:abc".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField(ref f)) if f == "telegram.chat_id"
        ));

        config.telegram.chat_id = Some("42".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.telegram_credentials(), Some(("123:abc", "42")));
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = with_discord();
        config.thresholds.battery_critical = 150;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_empty_shutdown_command() {
        let mut config = with_discord();
        config.shutdown.command.clear();
        assert!(config.validate().is_err());

        config.shutdown.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_masked_hides_secrets() {
        let mut config = with_discord();
        config.telegram.bot_token = Some("secret".to_string());
        let shown = config.masked().to_toml().unwrap();
        assert!(!shown.contains("discord.example"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_host_label_override() {
        let mut config = Config::default();
        config.general.hostname = Some("nas01".to_string());
        assert_eq!(config.host_label(), "nas01");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[thresholds]\nbattery_critical = 30\n").unwrap();
        assert_eq!(config.thresholds.battery_critical, 30);
        assert_eq!(config.ups.command, "upsc");
    }
}

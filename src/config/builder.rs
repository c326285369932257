//! Configuration builder
//!
//! Merges configuration from files, CLI arguments and environment.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist; without one the default locations are
    /// searched and defaults are kept if none exists.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default()?,
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override the UPS name
    pub fn with_ups(mut self, name: Option<String>) -> Self {
        if let Some(n) = name {
            self.config.ups.name = n;
        }
        self
    }

    /// Override the critical battery threshold
    pub fn with_threshold(mut self, threshold: Option<u32>) -> Self {
        if let Some(t) = threshold {
            self.config.thresholds.battery_critical = t;
        }
        self
    }

    /// Override the watch interval
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.general.interval_seconds = i;
        }
        self
    }

    /// Override the Discord webhook URL
    pub fn with_discord_webhook(mut self, url: Option<String>) -> Self {
        if let Some(u) = url {
            self.config.discord.webhook_url = Some(u);
        }
        self
    }

    /// Override the Telegram bot token
    pub fn with_telegram_token(mut self, token: Option<String>) -> Self {
        if let Some(t) = token {
            self.config.telegram.bot_token = Some(t);
        }
        self
    }

    /// Override the Telegram chat id
    pub fn with_telegram_chat_id(mut self, chat_id: Option<String>) -> Self {
        if let Some(c) = chat_id {
            self.config.telegram.chat_id = Some(c);
        }
        self
    }

    /// Override the state directory, relocating all state files into it
    pub fn with_state_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(d) = dir {
            self.config.paths.state_file = d.join("state");
            self.config.paths.queue_file = d.join("pending");
            self.config.paths.lock_file = d.join("upswatch.lock");
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

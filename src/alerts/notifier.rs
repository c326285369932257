//! Alert notification channels
//!
//! Provides webhook-style channels for alerts. Each channel reports its own
//! transport failure; the dispatcher treats them all alike.

use crate::error::ChannelError;
use serde_json::json;
use std::time::Duration;

/// Notification channel trait
pub trait Notifier {
    /// Deliver one message
    fn send(&self, message: &str) -> Result<(), ChannelError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

fn http_client(timeout: Duration) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            reqwest::blocking::Client::new()
        })
}

fn post_json(
    client: &reqwest::blocking::Client,
    channel: &str,
    url: &str,
    body: &serde_json::Value,
) -> Result<(), ChannelError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .map_err(|e| ChannelError::Transport {
            channel: channel.to_string(),
            reason: e.without_url().to_string(),
        })?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ChannelError::Rejected {
            channel: channel.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Discord webhook channel
pub struct DiscordNotifier {
    webhook_url: String,
    client: reqwest::blocking::Client,
}

impl DiscordNotifier {
    /// Create a notifier posting to `webhook_url`
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: http_client(timeout),
        }
    }

    /// Request body for a message
    pub fn payload(message: &str) -> serde_json::Value {
        json!({ "content": message })
    }
}

impl Notifier for DiscordNotifier {
    fn send(&self, message: &str) -> Result<(), ChannelError> {
        post_json(&self.client, self.name(), &self.webhook_url, &Self::payload(message))
    }

    fn name(&self) -> &str {
        "discord"
    }
}

/// Telegram bot channel
pub struct TelegramNotifier {
    api_base: String,
    bot_token: String,
    chat_id: String,
    client: reqwest::blocking::Client,
}

impl TelegramNotifier {
    /// Default Bot API endpoint
    pub const DEFAULT_API_BASE: &'static str = "https://api.telegram.org";

    /// Create a notifier sending as `bot_token` to `chat_id`
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            client: http_client(timeout),
        }
    }

    /// `sendMessage` endpoint for this bot
    pub fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Request body for a message
    pub fn payload(&self, message: &str) -> serde_json::Value {
        json!({ "chat_id": self.chat_id, "text": message })
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, message: &str) -> Result<(), ChannelError> {
        post_json(&self.client, self.name(), &self.endpoint(), &self.payload(message))
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

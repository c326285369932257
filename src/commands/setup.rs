//! Component wiring
//!
//! Builds the runtime components from a validated `Config`.

use crate::alerts::{DiscordNotifier, Dispatcher, MessageFormatter, TcpProbe, TelegramNotifier};
use crate::config::Config;
use crate::error::Result;
use crate::services::{CommandShutdown, Monitor, MonitorConfig, ShutdownService};
use crate::store::{PendingQueue, StateStore};
use crate::ups::UpscSource;

use std::time::Duration;

/// Build the dispatcher with every configured channel
pub fn build_dispatcher(config: &Config, dry_run: bool) -> Dispatcher {
    let probe = TcpProbe::new(
        config.network.probe_host.clone(),
        config.network.probe_timeout(),
    );
    let queue = PendingQueue::new(config.paths.queue_file.clone());
    let mut dispatcher = Dispatcher::new(Box::new(probe), queue).with_dry_run(dry_run);

    if let Some(url) = config.discord_webhook() {
        dispatcher.add_notifier(Box::new(DiscordNotifier::new(
            url,
            config.network.send_timeout(),
        )));
    }

    if let Some((token, chat_id)) = config.telegram_credentials() {
        dispatcher.add_notifier(Box::new(TelegramNotifier::new(
            config.telegram.api_base.clone(),
            token,
            chat_id,
            config.network.send_timeout(),
        )));
    }

    log::debug!("Configured {} notification channel(s)", dispatcher.notifier_count());
    dispatcher
}

/// Build the status source
pub fn build_source(config: &Config) -> UpscSource {
    UpscSource::new(config.ups.command.clone(), config.ups.name.clone())
}

/// Build a monitor for the configured UPS
pub fn build_monitor(
    config: &Config,
    dry_run: bool,
    max_ticks: Option<u64>,
) -> Result<Monitor<UpscSource>> {
    let monitor_config = MonitorConfig {
        interval: Duration::from_secs(config.general.interval_seconds),
        max_ticks,
        thresholds: config.thresholds.to_thresholds()?,
        dry_run,
    };

    let shutdown = ShutdownService::new(
        Box::new(CommandShutdown::new(config.shutdown.command.clone())),
        config.shutdown.enabled,
        dry_run,
    );

    Ok(Monitor::new(
        monitor_config,
        build_source(config),
        StateStore::new(config.paths.state_file.clone()),
        build_dispatcher(config, dry_run),
        shutdown,
        MessageFormatter::new(config.host_label()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.discord.webhook_url = Some("https://discord.example/hook".to_string());
        config.telegram.bot_token = Some("123:abc".to_string());
        config.telegram.chat_id = Some("42".to_string());
        config
    }

    #[test]
    fn test_dispatcher_has_both_channels() {
        assert_eq!(build_dispatcher(&config(), false).notifier_count(), 2);
    }

    #[test]
    fn test_dispatcher_discord_only() {
        let mut config = config();
        config.telegram.bot_token = None;
        assert_eq!(build_dispatcher(&config, false).notifier_count(), 1);
    }

    #[test]
    fn test_build_monitor() {
        let mut config = config();
        config.general.interval_seconds = 15;
        let monitor = build_monitor(&config, true, Some(2)).unwrap();
        assert_eq!(monitor.config().interval, Duration::from_secs(15));
        assert_eq!(monitor.config().max_ticks, Some(2));
        assert!(monitor.config().dry_run);
    }
}

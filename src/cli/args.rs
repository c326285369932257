//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// UPS battery watcher
///
/// Polls a NUT-managed UPS, notifies on power transitions and halts the
/// host when the battery goes critical. Meant to be run from a scheduler.
#[derive(Parser, Debug)]
#[command(name = "upswatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "UPSWATCH_CONFIG")]
    pub config: Option<String>,

    /// UPS to query (`name` or `name@host`)
    #[arg(long, global = true, env = "UPSWATCH_UPS")]
    pub ups: Option<String>,

    /// Critical battery percentage
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: Option<u32>,

    /// Directory for the state, queue and lock files
    #[arg(long, global = true, env = "UPSWATCH_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Discord webhook URL
    #[arg(long, global = true, env = "UPSWATCH_DISCORD_WEBHOOK", hide_env_values = true)]
    pub discord_webhook: Option<String>,

    /// Telegram bot token
    #[arg(long, global = true, env = "UPSWATCH_TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Telegram chat id
    #[arg(long, global = true, env = "UPSWATCH_TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Dry run mode - log decisions without sending, queuing, saving or shutting down
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one monitoring pass (intended for cron/systemd timers)
    Check,

    /// Run monitoring passes in a loop
    Watch(WatchArgs),

    /// Show UPS information and monitor state
    Status,

    /// Inspect or manage the pending notification queue
    Queue(QueueArgs),

    /// Send a test notification through every channel
    NotifyTest {
        /// Message text
        #[arg(default_value = "Test notification from upswatch")]
        text: String,
    },

    /// Show or create configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Interval between passes in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Stop after this many passes
    #[arg(long)]
    pub count: Option<u64>,
}

/// Arguments for queue commands
#[derive(Parser, Debug)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommands,
}

/// Queue subcommands
#[derive(Subcommand, Debug)]
pub enum QueueCommands {
    /// List pending notifications
    List,

    /// Try to deliver pending notifications now
    Flush,

    /// Discard pending notifications
    Clear,
}

/// Arguments for config commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration with secrets masked
    Show,

    /// Write a default configuration file
    Init {
        /// Destination (defaults to /etc/upswatch/config.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let args = Cli::try_parse_from(["upswatch", "check"]).unwrap();
        assert!(matches!(args.command, Commands::Check));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["upswatch", "-v", "status"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_global_overrides() {
        let args = Cli::try_parse_from([
            "upswatch",
            "check",
            "--ups",
            "rack@10.0.0.5",
            "--threshold",
            "30",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.ups.as_deref(), Some("rack@10.0.0.5"));
        assert_eq!(args.threshold, Some(30));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_threshold_validation() {
        let result = Cli::try_parse_from(["upswatch", "--threshold", "150", "check"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_watch() {
        let args =
            Cli::try_parse_from(["upswatch", "watch", "--interval", "30", "--count", "3"]).unwrap();
        if let Commands::Watch(watch) = args.command {
            assert_eq!(watch.interval, Some(30));
            assert_eq!(watch.count, Some(3));
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn test_cli_watch_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["upswatch", "watch", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_cli_parse_queue() {
        let args = Cli::try_parse_from(["upswatch", "queue", "flush"]).unwrap();
        if let Commands::Queue(queue) = args.command {
            assert!(matches!(queue.command, QueueCommands::Flush));
        } else {
            panic!("Expected Queue command");
        }
    }

    #[test]
    fn test_cli_parse_notify_test_default_text() {
        let args = Cli::try_parse_from(["upswatch", "notify-test"]).unwrap();
        if let Commands::NotifyTest { text } = args.command {
            assert_eq!(text, "Test notification from upswatch");
        } else {
            panic!("Expected NotifyTest command");
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let args =
            Cli::try_parse_from(["upswatch", "config", "init", "/tmp/u.toml", "--force"]).unwrap();
        if let Commands::Config(config) = args.command {
            if let ConfigCommands::Init { path, force } = config.command {
                assert_eq!(path, Some(PathBuf::from("/tmp/u.toml")));
                assert!(force);
            } else {
                panic!("Expected Init command");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }
}

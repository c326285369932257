//! upswatch - UPS battery watcher
//!
//! A command-line tool that watches a UPS through NUT's `upsc`, sends alerts
//! on power transitions and shuts the host down when the battery runs low.

use clap::Parser;
use upswatch::cli::args::{generate_completions, Cli, Commands, ConfigCommands, QueueCommands};
use upswatch::commands::{
    run_check, run_config, run_notify_test, run_queue, run_status, run_watch,
};
use upswatch::config::{Config, ConfigBuilder};
use upswatch::error::{AppError, ConfigError, SourceError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins over --verbose
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose)),
    )
    .init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

/// Default log filter for the verbosity flag
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = load_config(cli)?;

    match &cli.command {
        Commands::Check => run_check(&config, cli.format, cli.dry_run),

        Commands::Watch(args) => run_watch(&config, args, cli.dry_run),

        Commands::Status => run_status(&config, cli.format),

        Commands::Queue(args) => run_queue(&args.command, &config, cli.format, cli.dry_run),

        Commands::NotifyTest { text } => run_notify_test(text, &config, cli.format, cli.dry_run),

        Commands::Config(args) => run_config(&args.command, &config, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

/// Merge file, environment and flags into the effective configuration
fn load_config(cli: &Cli) -> Result<Config, AppError> {
    // `config init` must work with a missing or broken file
    let is_init = matches!(
        &cli.command,
        Commands::Config(args) if matches!(args.command, ConfigCommands::Init { .. })
    );

    let interval = match &cli.command {
        Commands::Watch(args) => args.interval,
        _ => None,
    };

    let mut builder = ConfigBuilder::new();
    if !is_init {
        builder = builder.with_file(cli.config.as_deref())?;
    }

    let config = builder
        .with_ups(cli.ups.clone())
        .with_threshold(cli.threshold)
        .with_interval(interval)
        .with_state_dir(cli.state_dir.clone())
        .with_discord_webhook(cli.discord_webhook.clone())
        .with_telegram_token(cli.telegram_token.clone())
        .with_telegram_chat_id(cli.telegram_chat_id.clone())
        .build();

    if needs_channels(&cli.command) {
        config.validate()?;
    }

    Ok(config)
}

/// Commands that send notifications need a valid channel setup
fn needs_channels(command: &Commands) -> bool {
    match command {
        Commands::Check | Commands::Watch(_) | Commands::NotifyTest { .. } => true,
        Commands::Queue(args) => matches!(args.command, QueueCommands::Flush),
        Commands::Status | Commands::Config(_) | Commands::Completions { .. } => false,
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Source(SourceError::Spawn { .. }) => {
            eprintln!();
            eprintln!("Hint: Make sure the NUT client tools are installed.");
            eprintln!("      On Debian/Ubuntu, install the nut-client package.");
        }
        AppError::Config(ConfigError::MissingField(_)) => {
            eprintln!();
            eprintln!("Hint: Create a configuration with 'upswatch config init',");
            eprintln!("      or set UPSWATCH_DISCORD_WEBHOOK / UPSWATCH_TELEGRAM_TOKEN.");
        }
        AppError::AlreadyRunning { .. } => {
            eprintln!();
            eprintln!("Hint: The lock is released when the other run exits;");
            eprintln!("      the next scheduled run will pick up from there.");
        }
        _ => {}
    }
}

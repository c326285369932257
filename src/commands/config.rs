//! Config command implementation

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::cli::output::{print_output, Message};
use crate::config::{Config, ConfigFile};
use crate::error::{ConfigError, Result};

use std::path::PathBuf;

/// Execute config commands
pub fn run_config(command: &ConfigCommands, config: &Config, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print_output(&config.masked(), format)?;
            Ok(())
        }
        ConfigCommands::Init { path, force } => run_config_init(path.clone(), *force, format),
    }
}

fn run_config_init(path: Option<PathBuf>, force: bool, format: OutputFormat) -> Result<()> {
    let path = path.unwrap_or_else(ConfigFile::system_path);

    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            key: path.display().to_string(),
            message: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    ConfigFile::save(&Config::default(), &path)?;
    log::info!("Wrote default configuration to {}", path.display());

    print_output(
        &Message {
            message: format!("Wrote default configuration to {}", path.display()),
            success: true,
        },
        format,
    )?;
    Ok(())
}

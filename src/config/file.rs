//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

const TEMPLATE_HEADER: &str = "\
# upswatch configuration
#
# At least one notification channel is required:
#
# [discord]
# webhook_url = \"https://discord.com/api/webhooks/...\"
#
# [telegram]
# bot_token = \"123456:ABC...\"
# chat_id = \"123456789\"
#
# Secrets can also come from UPSWATCH_DISCORD_WEBHOOK,
# UPSWATCH_TELEGRAM_TOKEN and UPSWATCH_TELEGRAM_CHAT_ID.

";

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// The first existing file wins; a file that fails to parse is an error
    /// rather than silently skipped.
    pub fn load_default() -> Result<Option<Config>, ConfigError> {
        for path in Self::default_paths() {
            if path.exists() {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// System-wide configuration file
    pub fn system_path() -> PathBuf {
        PathBuf::from("/etc/upswatch/config.toml")
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::system_path()];

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("upswatch/config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("upswatch.toml"));

        paths
    }

    /// Render a configuration with a commented header naming the channel keys
    pub fn template(config: &Config) -> Result<String, ConfigError> {
        let mut content = String::from(TEMPLATE_HEADER);
        content.push_str(&config.to_toml()?);
        Ok(content)
    }

    /// Write a configuration file, creating parent directories
    pub fn save<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), crate::error::AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::template(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_not_empty() {
        let paths = ConfigFile::default_paths();
        assert!(!paths.is_empty());
        assert_eq!(paths[0], PathBuf::from("/etc/upswatch/config.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ups\nname = ").unwrap();
        assert!(matches!(
            ConfigFile::load(&path),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_template_parses_back() {
        let content = ConfigFile::template(&Config::default()).unwrap();
        assert!(content.starts_with("# upswatch configuration"));
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.ups.name, "nutdev1");
        assert!(config.discord_webhook().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.ups.name = "rack@10.0.0.5".to_string();
        config.discord.webhook_url = Some("https://discord.example/hook".to_string());
        ConfigFile::save(&config, &path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.ups.name, "rack@10.0.0.5");
        assert_eq!(loaded.discord_webhook(), Some("https://discord.example/hook"));
    }
}

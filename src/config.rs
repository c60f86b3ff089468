use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Application settings, read from a hand-edited TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Override for the reference database location.
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_query_limit")]
    pub default_query_limit: i64,
}

fn default_query_limit() -> i64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            default_query_limit: default_query_limit(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("zsb-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".zsb-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    }

    /// Resolve the database path: CLI override first, then the config
    /// file, then the platform data directory.
    pub fn database_path(&self, cli_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.clone());
        }
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("zsb-cli");
        Ok(data_dir.join("zsb.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.database_path.is_none());
        assert_eq!(config.default_query_limit, 100);
    }

    #[test]
    fn test_cli_override_beats_config_file() {
        let config = Config {
            database_path: Some(PathBuf::from("/from/config.db")),
            default_query_limit: 100,
        };
        let cli_path = PathBuf::from("/from/cli.db");
        let resolved = config.database_path(Some(&cli_path)).unwrap();
        assert_eq!(resolved, cli_path);

        let resolved = config.database_path(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/config.db"));
    }
}

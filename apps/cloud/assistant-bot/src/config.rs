//! Configuration for the assistant bot

use std::path::{Path, PathBuf};
use std::time::Duration;

use core_config::server::ServerConfig;
use core_config::{ConfigError, Environment, FromEnv, env_duration_secs, env_optional};
use domain_assistant::YandexGptConfig;
use domain_cloud_resources::YandexCloudConfig;
use domain_pricing::RateTable;
use eyre::{Result, WrapErr};
use tracing::info;

use crate::telegram::TelegramConfig;

/// Everything the dispatcher and its collaborators need
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub gpt: YandexGptConfig,
    pub cloud: YandexCloudConfig,
    pub rates: RatesConfig,
    pub collaborator_timeout: Duration,
}

impl Config {
    /// Folder that scopes inventory listings and the model URI
    pub fn folder_id(&self) -> &str {
        &self.gpt.folder_id
    }
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            gpt: YandexGptConfig::from_env()?,
            cloud: YandexCloudConfig::from_env()?,
            rates: RatesConfig::from_env()?,
            collaborator_timeout: env_duration_secs("COLLABORATOR_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Optional rate table override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatesConfig {
    pub rates_file: Option<PathBuf>,
}

impl FromEnv for RatesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            rates_file: env_optional("PRICING_RATES_FILE").map(PathBuf::from),
        })
    }
}

impl RatesConfig {
    /// Built-in table unless a rates file is configured
    pub fn load(&self) -> Result<RateTable> {
        match &self.rates_file {
            Some(path) => load_rates_file(path),
            None => Ok(RateTable::default()),
        }
    }
}

fn load_rates_file(path: &Path) -> Result<RateTable> {
    let rates = RateTable::from_file(path)
        .wrap_err_with(|| format!("Failed to load rate table from {}", path.display()))?;
    info!(path = %path.display(), "Using custom rate table");
    Ok(rates)
}

/// Load the Telegram settings; only `run` needs them
pub fn telegram_config() -> Result<TelegramConfig> {
    TelegramConfig::from_env().wrap_err("Telegram transport is not configured")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_requires_yandex_credentials() {
        temp_env::with_vars(
            [("YANDEX_API_KEY", None::<&str>), ("YANDEX_FOLDER_ID", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(_)));
            },
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("YANDEX_API_KEY", Some("key")),
                ("YANDEX_FOLDER_ID", Some("b1gfolder")),
                ("COLLABORATOR_TIMEOUT_SECS", Some("10")),
                ("PORT", Some("9090")),
                ("PRICING_RATES_FILE", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.folder_id(), "b1gfolder");
                assert_eq!(config.collaborator_timeout, Duration::from_secs(10));
                assert_eq!(config.cloud.timeout, Duration::from_secs(10));
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.rates, RatesConfig::default());
            },
        );
    }

    #[test]
    fn test_rates_default_table() {
        let rates = RatesConfig::default().load().unwrap();
        assert_eq!(rates, RateTable::default());
    }

    #[test]
    fn test_rates_from_file() {
        let mut table = RateTable::default();
        table.compute.cpu_hour = 5.0;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&table).unwrap().as_bytes())
            .unwrap();

        let config = RatesConfig {
            rates_file: Some(file.path().to_path_buf()),
        };
        assert_eq!(config.load().unwrap().compute.cpu_hour, 5.0);
    }

    #[test]
    fn test_rates_missing_file_is_error() {
        let config = RatesConfig {
            rates_file: Some(PathBuf::from("/nonexistent/rates.json")),
        };
        assert!(config.load().is_err());
    }
}

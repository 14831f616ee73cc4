use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub query: QueryConfig,
    pub time: TimeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Hard cap on occurrences produced per recurring series in one query.
    pub expansion_limit: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeConfig {
    /// IANA name of the single civil timezone used for rule expansion.
    pub timezone: String,
}

impl TimeConfig {
    /// ## Summary
    /// Resolves the configured timezone name to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    /// Returns an error if the name is not a known IANA timezone.
    pub fn civil_tz(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| CoreError::ConfigError(format!("unknown timezone: {}", self.timezone)))
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("logging.level", "debug")?
            .set_default("query.expansion_limit", i64::from(u16::MAX))?
            .set_default("time.timezone", "UTC")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_owned(),
            },
            query: QueryConfig {
                expansion_limit: u16::MAX,
            },
            time: TimeConfig {
                timezone: "UTC".to_owned(),
            },
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

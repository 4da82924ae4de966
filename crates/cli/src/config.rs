//! Runtime configuration: environment variables, overridden by flags.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use stockwatch_observability::{LogFormat, ParseLogFormatError};

pub const ENV_INVENTORY_FILE: &str = "STOCKWATCH_INVENTORY_FILE";
pub const ENV_PREFIX: &str = "STOCKWATCH_PREFIX";
pub const ENV_TIMEOUT_MS: &str = "STOCKWATCH_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "STOCKWATCH_MAX_RETRIES";
pub const ENV_SERVICE_LATENCY_MS: &str = "STOCKWATCH_SERVICE_LATENCY_MS";
pub const ENV_LOG_FORMAT: &str = "STOCKWATCH_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key}: {source}")]
    InvalidLogFormat {
        key: &'static str,
        #[source]
        source: ParseLogFormatError,
    },
}

/// Command-line flags. Every flag is optional and overrides its env variable.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "stockwatch")]
#[command(about = "Report outdated stock and discounted prices")]
pub struct Args {
    /// JSON file with an array of inventory items (default: built-in demo data)
    #[arg(long, value_name = "PATH")]
    pub inventory: Option<PathBuf>,

    /// Name prefix selecting items to discount
    #[arg(long)]
    pub prefix: Option<String>,

    /// Per-attempt deadline for the discount lookup
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Retries after the first failed discount lookup
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Simulated latency of the discount service
    #[arg(long, value_name = "MS")]
    pub service_latency_ms: Option<u64>,

    /// Log output format: json or pretty
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub inventory_file: Option<PathBuf>,
    pub prefix: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub service_latency: Duration,
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            inventory_file: None,
            prefix: "A".to_string(),
            timeout: Duration::from_millis(100),
            max_retries: 3,
            service_latency: Duration::from_millis(50),
            log_format: LogFormat::Pretty,
        }
    }
}

impl CliConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_INVENTORY_FILE).filter(|p| !p.trim().is_empty()) {
            config.inventory_file = Some(PathBuf::from(path));
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            config.prefix = prefix;
        }
        if let Some(ms) = parse_number::<u64>(&lookup, ENV_TIMEOUT_MS)? {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(n) = parse_number::<u32>(&lookup, ENV_MAX_RETRIES)? {
            config.max_retries = n;
        }
        if let Some(ms) = parse_number::<u64>(&lookup, ENV_SERVICE_LATENCY_MS)? {
            config.service_latency = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw
                .parse()
                .map_err(|source| ConfigError::InvalidLogFormat {
                    key: ENV_LOG_FORMAT,
                    source,
                })?;
        }

        Ok(config)
    }

    pub fn with_args(mut self, args: Args) -> Self {
        if let Some(path) = args.inventory {
            self.inventory_file = Some(path);
        }
        if let Some(prefix) = args.prefix {
            self.prefix = prefix;
        }
        if let Some(ms) = args.timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        if let Some(n) = args.max_retries {
            self.max_retries = n;
        }
        if let Some(ms) = args.service_latency_ms {
            self.service_latency = Duration::from_millis(ms);
        }
        if let Some(format) = args.log_format {
            self.log_format = format;
        }
        self
    }
}

fn parse_number<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: core::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}

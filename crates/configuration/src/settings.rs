use crate::error::ConfigError;
use core_types::OutlierSelection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` yields a
/// working setup pointed at the public upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    pub finance: FinanceDefaults,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Checks the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.upstream.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "upstream.base_url must be an http(s) URL (got '{}')",
                self.upstream.base_url
            )));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "upstream.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.analysis.top_picks == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.top_picks must be at least 1".to_string(),
            ));
        }
        if self.finance.term_years == 0 {
            return Err(ConfigError::ValidationError(
                "finance.term_years must be at least 1".to_string(),
            ));
        }
        if self.finance.deposit_pct < Decimal::ZERO
            || self.finance.deposit_pct > Decimal::ONE_HUNDRED
        {
            return Err(ConfigError::ValidationError(
                "finance.deposit_pct must be between 0 and 100".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

/// Where listings come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub properties_path: String,
    /// Sent as `Authorization: Bearer <token>`.
    pub bearer_token: String,
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn properties_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.properties_path.trim_start_matches('/')
        )
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.microburbs.com.au/report_generator/api".to_string(),
            properties_path: "/suburb/properties".to_string(),
            bearer_token: "test".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "server.host '{}' is not an IP address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Tunables for the market report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub top_picks: usize,
    pub outlier_selection: OutlierSelection,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_picks: 5,
            outlier_selection: OutlierSelection::FirstMatch,
        }
    }
}

/// Values the calculators fall back to when a caller leaves an input out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceDefaults {
    /// Deposit as a percentage of the price.
    pub deposit_pct: Decimal,
    pub interest_rate_pct: Decimal,
    pub term_years: u32,
    pub appreciation_pct: Decimal,
    pub rental_yield_pct: Decimal,
    pub holding_years: u32,
}

impl Default for FinanceDefaults {
    fn default() -> Self {
        Self {
            deposit_pct: dec!(20),
            interest_rate_pct: dec!(6.0),
            term_years: 30,
            appreciation_pct: dec!(5),
            rental_yield_pct: dec!(4),
            holding_years: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs also go to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "suburb-scout.log".to_string(),
        }
    }
}

/// How the CLI renders results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

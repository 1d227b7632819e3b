//! Application configuration loaded from environment variables.
//!
//! Read once at startup and validated before anything connects. A `.env` file
//! in the working directory is loaded first by `main.rs` when present.
//!
//! ## Database
//!
//! `DATABASE_URL` wins. Without it the URL is assembled from `DB_HOST`
//! (default `localhost`), `DB_PORT` (default `5432`), `DB_USER`, `DB_PASSWORD`
//! and `DB_NAME`.
//!
//! Pool tuning: `DB_MAX_CONNECTIONS` (10), `DB_CONNECT_TIMEOUT` (30s),
//! `DB_IDLE_TIMEOUT` (600s), `DB_MAX_LIFETIME` (1800s).
//!
//! ## Service
//!
//! - `BASE_URL` - prefix of returned short URLs (default: `http://localhost:8080`)
//! - `LISTEN` - bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - log filter (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `SHORT_CODE_LENGTH` - characters per code, 4 to 32 (default: 6)
//! - `CODE_GENERATION_ATTEMPTS` - codes tried on collision, 1 to 20 (default: 5)

use anyhow::{Context, Result, bail, ensure};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::application::services::link_service::DEFAULT_CODE_GENERATION_ATTEMPTS;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    /// Prefix of every returned short URL, without a trailing slash.
    pub base_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub codes: CodePolicy,
}

/// Connection string and pool limits.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

/// How short codes are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePolicy {
    pub length: usize,
    pub attempts: usize,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            attempts: DEFAULT_CODE_GENERATION_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        }
    }
}

impl Config {
    /// Reads every setting from the environment without validating ranges.
    ///
    /// # Errors
    ///
    /// Fails when the database location cannot be determined or
    /// `LOG_FORMAT` is not recognised.
    pub fn from_env() -> Result<Self> {
        let database =
            DatabaseConfig::from_env().context("Failed to load database configuration")?;

        let log_format = env::var("LOG_FORMAT")
            .ok()
            .map(|v| v.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(LogFormat::Text);

        Ok(Self {
            database,
            base_url: base_url_from_env(),
            listen_addr: env_or("LISTEN", DEFAULT_LISTEN_ADDR),
            log_level: env_or("RUST_LOG", "info"),
            log_format,
            codes: CodePolicy {
                length: parse_or("SHORT_CODE_LENGTH", DEFAULT_CODE_LENGTH),
                attempts: parse_or(
                    "CODE_GENERATION_ATTEMPTS",
                    DEFAULT_CODE_GENERATION_ATTEMPTS,
                ),
            },
        })
    }

    /// Checks addresses, URLs and numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns the first setting found out of range.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.listen_addr.contains(':'),
            "LISTEN must look like 'host:port', got '{}'",
            self.listen_addr
        );

        let base = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a URL: '{}'", self.base_url))?;
        ensure!(
            matches!(base.scheme(), "http" | "https"),
            "BASE_URL must use http or https, got '{}'",
            self.base_url
        );

        self.database.validate()?;

        ensure!(
            (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.codes.length),
            "SHORT_CODE_LENGTH must be between {} and {}, got {}",
            MIN_CODE_LENGTH,
            MAX_CODE_LENGTH,
            self.codes.length
        );
        ensure!(
            (1..=20).contains(&self.codes.attempts),
            "CODE_GENERATION_ATTEMPTS must be between 1 and 20, got {}",
            self.codes.attempts
        );

        Ok(())
    }

    /// Logs the effective settings, password masked.
    pub fn print_summary(&self) {
        tracing::info!(
            listen = %self.listen_addr,
            base_url = %self.base_url,
            database = %mask_connection_string(&self.database.url),
            pool_size = self.database.max_connections,
            log_level = %self.log_level,
            log_format = ?self.log_format,
            code_length = self.codes.length,
            code_attempts = self.codes.attempts,
            "Configuration loaded"
        );
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: database_url_from_env()?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            connect_timeout: Duration::from_secs(parse_or("DB_CONNECT_TIMEOUT", 30)),
            idle_timeout: Duration::from_secs(parse_or("DB_IDLE_TIMEOUT", 600)),
            max_lifetime: Duration::from_secs(parse_or("DB_MAX_LIFETIME", 1800)),
        })
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.url.starts_with("postgres://") || self.url.starts_with("postgresql://"),
            "DATABASE_URL must be a postgres:// URL, got '{}'",
            mask_connection_string(&self.url)
        );
        ensure!(
            self.max_connections > 0,
            "DB_MAX_CONNECTIONS must be at least 1"
        );
        ensure!(
            !self.connect_timeout.is_zero(),
            "DB_CONNECT_TIMEOUT must be greater than 0"
        );
        Ok(())
    }
}

fn database_url_from_env() -> Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let required = |key: &str| {
        env::var(key).with_context(|| format!("{key} is required when DATABASE_URL is unset"))
    };

    let user = required("DB_USER")?;
    let password = required("DB_PASSWORD")?;
    let name = required("DB_NAME")?;
    let host = env_or("DB_HOST", "localhost");
    let port = env_or("DB_PORT", "5432");

    Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
}

fn base_url_from_env() -> String {
    env::var("BASE_URL")
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset or unparseable values fall back to `default`.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Replaces the password of a connection URL with `***`.
///
/// Strings that do not parse as URLs, or carry no password, come back unchanged.
pub fn mask_connection_string(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            if url.set_password(Some("***")).is_err() {
                return raw.to_string();
            }
            url.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Loads and validates configuration. Expects `.env` to be applied already.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

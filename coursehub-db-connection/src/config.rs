use std::env::{self, VarError};
use std::time::Duration;

use serde::Deserialize;

use crate::error::DbConnectionError;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
const DEFAULT_TEST_BEFORE_ACQUIRE: bool = true;

/// Basic configuration for creating a SQLx connection pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConnectionConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: Option<u64>,
    pub test_before_acquire: bool,
}

impl Default for DbConnectionConfig {
    #[inline]
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: Some(DEFAULT_IDLE_TIMEOUT_SECS),
            test_before_acquire: DEFAULT_TEST_BEFORE_ACQUIRE,
        }
    }
}

impl DbConnectionConfig {
    /// Creates a new configuration with the provided URL and sane defaults.
    #[inline]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Override the maximum pool size, clamping the minimum so it never exceeds it.
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self.min_connections = self.min_connections.min(max);
        self
    }

    /// Loads configuration from environment variables using the supplied prefix.
    ///
    /// Expected variables:
    /// - `{PREFIX}_DATABASE_URL` (required)
    /// - `{PREFIX}_DB_MAX_CONNECTIONS` (optional)
    /// - `{PREFIX}_DB_MIN_CONNECTIONS` (optional)
    /// - `{PREFIX}_DB_CONNECT_TIMEOUT_SECS` (optional)
    /// - `{PREFIX}_DB_IDLE_TIMEOUT_SECS` (optional)
    /// - `{PREFIX}_DB_TEST_BEFORE_ACQUIRE` (optional, bool)
    pub fn from_env(prefix: &str) -> Result<Self, DbConnectionError> {
        let url_var = format!("{prefix}_DATABASE_URL");
        let url =
            env::var(&url_var).map_err(|_| DbConnectionError::MissingEnvVar(url_var.clone()))?;
        if url.trim().is_empty() {
            return Err(DbConnectionError::EmptyDatabaseUrl);
        }

        let mut config = Self::new(url);

        if let Some(max) = read_var(prefix, "DB_MAX_CONNECTIONS", parse_number::<u32>)? {
            config.max_connections = max;
        }
        if let Some(min) = read_var(prefix, "DB_MIN_CONNECTIONS", parse_number::<u32>)? {
            config.min_connections = min;
        }
        config.validate_sizes()?;

        if let Some(secs) = read_var(prefix, "DB_CONNECT_TIMEOUT_SECS", parse_number::<u64>)? {
            config.connect_timeout_secs = secs;
        }
        if let Some(secs) = read_var(prefix, "DB_IDLE_TIMEOUT_SECS", parse_number::<u64>)? {
            config.idle_timeout_secs = Some(secs);
        }
        if let Some(value) = read_var(prefix, "DB_TEST_BEFORE_ACQUIRE", parse_flag)? {
            config.test_before_acquire = value;
        }

        Ok(config)
    }

    /// Checks the pool bounds are usable.
    pub fn validate_sizes(&self) -> Result<(), DbConnectionError> {
        if self.max_connections == 0 {
            return Err(DbConnectionError::InvalidPoolSize(
                "max_connections must be greater than 0".to_owned(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(DbConnectionError::InvalidPoolSize(
                "min_connections must not exceed max_connections".to_owned(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[inline]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

type Parser<T> = fn(&str, &str) -> Result<T, DbConnectionError>;

fn read_var<T>(prefix: &str, suffix: &str, parse: Parser<T>) -> Result<Option<T>, DbConnectionError> {
    let var = format!("{prefix}_{suffix}");
    match env::var(&var) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                parse(&var, trimmed).map(Some)
            }
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(DbConnectionError::InvalidUnicode(var)),
    }
}

fn parse_number<T>(var: &str, value: &str) -> Result<T, DbConnectionError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    value.parse().map_err(|source| DbConnectionError::InvalidNumber {
        var: var.to_owned(),
        source,
    })
}

fn parse_flag(var: &str, value: &str) -> Result<bool, DbConnectionError> {
    match value.as_bytes() {
        b"1" | b"true" | b"TRUE" | b"yes" | b"YES" | b"on" | b"ON" => Ok(true),
        b"0" | b"false" | b"FALSE" | b"no" | b"NO" | b"off" | b"OFF" => Ok(false),
        _ => Err(DbConnectionError::InvalidBoolean {
            var: var.to_owned(),
            value: value.to_owned(),
        }),
    }
}

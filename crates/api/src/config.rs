//! Process configuration, read from environment variables at startup.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};

use chipreg_auth::HashingParams;
use chipreg_infra::activity_log::{DEFAULT_PAGE_SIZE, DEFAULT_RETENTION};
use chipreg_observability::LogFormat;

/// Signing key used when `JWT_SECRET` is unset. Not for production.
pub const DEV_JWT_SECRET: &str = "dev-secret";

/// Where records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per collection under `data_dir`.
    File,
    /// Process memory; lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected 'file' or 'memory')")),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub store_backend: StoreBackend,
    pub data_dir: PathBuf,
    pub activity_retention: usize,
    pub activity_page_size: usize,
    pub request_timeout: Duration,
    pub hashing: HashingParams,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: chrono::Duration::days(30),
            store_backend: StoreBackend::File,
            data_dir: PathBuf::from("./data"),
            activity_retention: DEFAULT_RETENTION,
            activity_page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
            hashing: HashingParams::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("store_backend", &self.store_backend)
            .field("data_dir", &self.data_dir)
            .field("activity_retention", &self.activity_retention)
            .field("activity_page_size", &self.activity_page_size)
            .field("request_timeout", &self.request_timeout)
            .field("hashing", &self.hashing)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let token_ttl_days: i64 = parse(&lookup, "TOKEN_TTL_DAYS", 30)?;
        if token_ttl_days <= 0 {
            bail!("TOKEN_TTL_DAYS must be positive, got {token_ttl_days}");
        }
        let timeout_secs: u64 = parse(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be positive");
        }

        let config = Self {
            bind_addr: parse(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            jwt_secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.jwt_secret),
            token_ttl: chrono::Duration::days(token_ttl_days),
            store_backend: parse(&lookup, "STORE_BACKEND", defaults.store_backend)?,
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            activity_retention: parse(&lookup, "ACTIVITY_RETENTION", defaults.activity_retention)?,
            activity_page_size: parse(&lookup, "ACTIVITY_PAGE_SIZE", defaults.activity_page_size)?,
            request_timeout: Duration::from_secs(timeout_secs),
            hashing: HashingParams {
                memory_kib: parse(&lookup, "ARGON2_MEMORY_KIB", defaults.hashing.memory_kib)?,
                iterations: parse(&lookup, "ARGON2_ITERATIONS", defaults.hashing.iterations)?,
                lanes: parse(&lookup, "ARGON2_LANES", defaults.hashing.lanes)?,
            },
            log_format: parse(&lookup, "LOG_FORMAT", defaults.log_format)?,
        };

        if config.activity_retention == 0 || config.activity_page_size == 0 {
            bail!("ACTIVITY_RETENTION and ACTIVITY_PAGE_SIZE must be positive");
        }

        Ok(config)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: '{raw}'")),
    }
}

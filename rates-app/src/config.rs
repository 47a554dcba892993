//! Configuration loading from environment.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use rates_hex::{CacheConfig, DEFAULT_PROVIDER_TIMEOUT};
use rates_providers::{FRANKFURTER_URL, FREE_EXCHANGE_URL, HttpClientConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider_timeout: Duration,
    pub cache: CacheConfig,
    pub http: HttpClientConfig,
    pub free_exchange_url: String,
    pub frankfurter_url: String,
    /// OTLP collector; tracing export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let http_defaults = HttpClientConfig::default();
        let cache_defaults = CacheConfig::default();

        let port = parse_or(&lookup, "PORT", 3000)?;

        let provider_timeout = Duration::from_millis(parse_or(
            &lookup,
            "PROVIDER_TIMEOUT_MS",
            DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64,
        )?);

        let cache = CacheConfig {
            ttl: Duration::from_secs(parse_or(
                &lookup,
                "CACHE_TTL_SECS",
                cache_defaults.ttl.as_secs(),
            )?),
            max_entries: parse_or(&lookup, "CACHE_MAX_ENTRIES", cache_defaults.max_entries)?,
        };

        let http = HttpClientConfig {
            connect_timeout: Duration::from_millis(parse_or(
                &lookup,
                "HTTP_CONNECT_TIMEOUT_MS",
                http_defaults.connect_timeout.as_millis() as u64,
            )?),
            request_timeout: Duration::from_millis(parse_or(
                &lookup,
                "HTTP_REQUEST_TIMEOUT_MS",
                http_defaults.request_timeout.as_millis() as u64,
            )?),
            pool_max_idle_per_host: parse_or(
                &lookup,
                "HTTP_POOL_MAX_IDLE_PER_HOST",
                http_defaults.pool_max_idle_per_host,
            )?,
        };

        if provider_timeout.is_zero() {
            anyhow::bail!("PROVIDER_TIMEOUT_MS must be greater than zero");
        }

        Ok(Self {
            port,
            provider_timeout,
            cache,
            http,
            free_exchange_url: lookup("FREE_EXCHANGE_URL")
                .unwrap_or_else(|| FREE_EXCHANGE_URL.to_string()),
            frankfurter_url: lookup("FRANKFURTER_URL")
                .unwrap_or_else(|| FRANKFURTER_URL.to_string()),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
        })
    }
}

fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

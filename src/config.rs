use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

use crate::utils::comparator::{SortDirection, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_api: String,
    pub request_timeout_secs: u64,

    // logging
    pub log_dir: String,
    pub log_level: tracing::Level,

    // initial table ordering
    pub default_order_by: SortKey,
    pub default_order: SortDirection,
}

impl Config {
    /// Read `.env` and the process environment. `base_api` wins over `BASE_API`.
    pub fn from_env(base_api: Option<&str>) -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| match (key, base_api) {
            ("BASE_API", Some(url)) => Some(url.to_string()),
            _ => env::var(key).ok(),
        })
    }

    /// Build a config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_api = lookup("BASE_API")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("BASE_API must be set"))?;

        Ok(Self {
            base_api,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::INFO)?,
            default_order_by: parse_or(&lookup, "DEFAULT_ORDER_BY", SortKey::default())?,
            default_order: parse_or(&lookup, "DEFAULT_ORDER", SortDirection::default())?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: '{raw}'")),
        None => Ok(default),
    }
}

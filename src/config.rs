//! Client configuration resolved at build time.
//!
//! The browser has no process environment, so values are baked in through
//! `option_env!` and parsed with the same helpers the tests exercise.
//!
//! Optional:
//! - `STOREFRONT_API_BASE_URL`: default `http://localhost:8081`
//! - `STOREFRONT_REQUEST_TIMEOUT_MS`: default 5000
//! - `STOREFRONT_ADMIN_SCOPES`: comma-separated path prefixes, default `/admin`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_ADMIN_SCOPE: &str = "/admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub admin_scopes: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            admin_scopes: vec![DEFAULT_ADMIN_SCOPE.to_owned()],
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured when the crate was compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("STOREFRONT_API_BASE_URL"),
            option_env!("STOREFRONT_REQUEST_TIMEOUT_MS"),
            option_env!("STOREFRONT_ADMIN_SCOPES"),
        )
    }

    pub fn from_values(
        base_url: Option<&str>,
        timeout_ms: Option<&str>,
        admin_scopes: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(base_url.unwrap_or(DEFAULT_API_BASE_URL))?,
            request_timeout: Duration::from_millis(parse_u64_or(timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS)),
            admin_scopes: parse_scopes(admin_scopes),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_u64_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn parse_scopes(raw: Option<&str>) -> Vec<String> {
    let scopes: Vec<String> = raw
        .unwrap_or(DEFAULT_ADMIN_SCOPE)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let s = s.trim_end_matches('/');
            if s.starts_with('/') { s.to_owned() } else { format!("/{s}") }
        })
        .collect();
    if scopes.is_empty() { vec![DEFAULT_ADMIN_SCOPE.to_owned()] } else { scopes }
}

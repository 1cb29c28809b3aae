//! # Configuration
//!
//! Everything is read once, when the system starts. Changing the environment afterwards
//! has no effect on running resources.
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `PATIENT_BACKEND_URL` | yes | Base URL of the patient API |
//! | `DASHBOARD_API_URL` | no | Base URL of the dashboard API, defaults to `PATIENT_BACKEND_URL` |
//! | `BACKEND_TIMEOUT_SECS` | no | Whole-request deadline; unset means no deadline |
//! | `BACKEND_CONNECT_TIMEOUT_SECS` | no | Connect deadline |
//! | `RESOURCE_BUSY_POLICY` | no | `drop-if-busy` (default) or `always-issue` |
//! | `RESOURCE_UPDATE_STRATEGY` | no | `refetch` (default) or `optimistic` |

use crate::framework::{BusyPolicy, HttpTimeouts, UpdateStrategy};
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const BACKEND_URL_VAR: &str = "PATIENT_BACKEND_URL";
pub const DASHBOARD_URL_VAR: &str = "DASHBOARD_API_URL";
pub const TIMEOUT_VAR: &str = "BACKEND_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "BACKEND_CONNECT_TIMEOUT_SECS";
pub const BUSY_POLICY_VAR: &str = "RESOURCE_BUSY_POLICY";
pub const UPDATE_STRATEGY_VAR: &str = "RESOURCE_UPDATE_STRATEGY";

/// Errors that can occur when loading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub dashboard_url: String,
    pub timeouts: HttpTimeouts,
    pub busy_policy: BusyPolicy,
    pub update_strategy: UpdateStrategy,
}

impl Config {
    /// A configuration pointing both APIs at `backend_url`, with default policies.
    pub fn new(backend_url: impl Into<String>) -> Result<Self, ConfigError> {
        let backend_url = parse_url(BACKEND_URL_VAR, &backend_url.into())?;
        Ok(Self {
            dashboard_url: backend_url.clone(),
            backend_url,
            timeouts: HttpTimeouts::default(),
            busy_policy: BusyPolicy::default(),
            update_strategy: UpdateStrategy::default(),
        })
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(get(BACKEND_URL_VAR).ok_or(ConfigError::Missing(BACKEND_URL_VAR))?)?;

        if let Some(url) = get(DASHBOARD_URL_VAR) {
            config.dashboard_url = parse_url(DASHBOARD_URL_VAR, &url)?;
        }
        config.timeouts = HttpTimeouts {
            request: get(TIMEOUT_VAR).map(|v| parse_secs(TIMEOUT_VAR, &v)).transpose()?,
            connect: get(CONNECT_TIMEOUT_VAR)
                .map(|v| parse_secs(CONNECT_TIMEOUT_VAR, &v))
                .transpose()?,
        };
        if let Some(policy) = get(BUSY_POLICY_VAR) {
            config.busy_policy = parse_busy_policy(&policy)?;
        }
        if let Some(strategy) = get(UPDATE_STRATEGY_VAR) {
            config.update_strategy = parse_update_strategy(&strategy)?;
        }
        Ok(config)
    }
}

/// Accepts absolute http(s) URLs with a host. Trailing slashes are dropped so paths can
/// be appended with a single `/`.
fn parse_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var,
        message: format!("'{raw}' {reason}"),
    };
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| invalid(format!("is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("is not an http(s) URL".to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("has no host".to_string()));
    }
    Ok(trimmed.to_string())
}

fn parse_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            var,
            message: format!("'{raw}' is not a positive number of seconds"),
        }),
    }
}

fn parse_busy_policy(raw: &str) -> Result<BusyPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "drop-if-busy" => Ok(BusyPolicy::DropIfBusy),
        "always-issue" => Ok(BusyPolicy::AlwaysIssue),
        _ => Err(ConfigError::Invalid {
            var: BUSY_POLICY_VAR,
            message: format!("'{raw}' (expected drop-if-busy or always-issue)"),
        }),
    }
}

fn parse_update_strategy(raw: &str) -> Result<UpdateStrategy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "refetch" => Ok(UpdateStrategy::Refetch),
        "optimistic" => Ok(UpdateStrategy::Optimistic),
        _ => Err(ConfigError::Invalid {
            var: UPDATE_STRATEGY_VAR,
            message: format!("'{raw}' (expected refetch or optimistic)"),
        }),
    }
}

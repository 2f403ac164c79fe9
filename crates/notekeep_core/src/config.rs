//! API endpoint configuration.
//!
//! # Responsibility
//! - Resolve the notes API base endpoint once, at startup.
//! - Reject missing or malformed endpoints before any request is issued.
//!
//! # Invariants
//! - A constructed `ApiConfig` always holds an absolute http(s) URL without a
//!   trailing slash.
//! - Nothing in core reads the environment after `ApiConfig` is built.

use reqwest::Url;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable holding the notes API base endpoint.
pub const BASE_URL_ENV: &str = "NOTES_API_BASE_URL";

/// Fatal configuration error raised during startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base endpoint variable is unset or blank.
    MissingBaseUrl,
    /// Base endpoint is present but is not an absolute http(s) URL.
    InvalidBaseUrl { value: String, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBaseUrl => {
                write!(f, "{BASE_URL_ENV} environment variable is required")
            }
            Self::InvalidBaseUrl { value, reason } => {
                write!(f, "invalid {BASE_URL_ENV} `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Explicit transport configuration passed into `Transport::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validates and normalizes a base endpoint such as
    /// `http://localhost:4000/v1`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                value: trimmed.to_string(),
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl {
                value: trimmed.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// Reads the base endpoint from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the base endpoint through a caller-provided lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_ENV) {
            Some(value) => Self::new(&value),
            None => Err(ConfigError::MissingBaseUrl),
        }
    }

    /// Base endpoint without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a relative API path onto the base endpoint.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

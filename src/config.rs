//! Client configuration management
//!
//! This module handles loading and validating configuration from environment
//! variables. All configuration is loaded once at startup and handed to the
//! session by value; tests construct `Config` directly.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_JUDGE_TIMEOUT_SECONDS, DEFAULT_JUDGE_URL,
    JUDGE_POLL_INTERVAL_MS, STATS_POLL_INTERVAL_SECONDS, STATS_RETRY_INTERVAL_SECONDS,
};

/// Main client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub judge: JudgeConfig,
    pub stats: StatsConfig,
}

/// CodeQuest backend configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, no trailing slash
    pub base_url: String,
    /// Anti-forgery token sourced from page-embedded metadata
    pub csrf_token: String,
    /// Challenge this session is bound to
    pub challenge_slug: String,
}

/// External code-execution service configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Base URL, no trailing slash
    pub base_url: String,
    /// Optional API key forwarded on every judge request
    pub api_key: Option<String>,
    /// Delay between consecutive status polls
    pub poll_interval: Duration,
    /// Ceiling on a full poll series for one execution
    pub poll_timeout: Duration,
}

/// Dashboard stats polling configuration
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Interval between refreshes
    pub interval: Duration,
    /// Interval applied after a failed fetch
    pub retry_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            backend: BackendConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
            stats: StatsConfig::from_env()?,
        })
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env::var("CODEQUEST_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            csrf_token: env::var("CODEQUEST_CSRF_TOKEN")
                .map_err(|_| ConfigError::Missing("CODEQUEST_CSRF_TOKEN".to_string()))?,
            challenge_slug: env::var("CODEQUEST_CHALLENGE_SLUG")
                .map_err(|_| ConfigError::Missing("CODEQUEST_CHALLENGE_SLUG".to_string()))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let poll_timeout_secs: u64 = env::var("JUDGE_POLL_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_JUDGE_TIMEOUT_SECONDS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JUDGE_POLL_TIMEOUT_SECONDS".to_string()))?;

        Ok(Self {
            base_url: env::var("JUDGE_URL").unwrap_or_else(|_| DEFAULT_JUDGE_URL.to_string()),
            api_key: env::var("JUDGE_API_KEY").ok(),
            poll_interval: Duration::from_millis(JUDGE_POLL_INTERVAL_MS),
            poll_timeout: Duration::from_secs(poll_timeout_secs),
        })
    }
}

impl StatsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            interval: Duration::from_secs(STATS_POLL_INTERVAL_SECONDS),
            retry_interval: Duration::from_secs(STATS_RETRY_INTERVAL_SECONDS),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

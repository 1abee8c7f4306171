//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Origins the marketing site is served from
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://lagentry.com",
    "https://www.lagentry.com",
    "https://aganret.com",
    "https://www.aganret.com",
    "http://localhost:3000",
];

/// Idle conversations are purged after this many hours
const DEFAULT_CHAT_RETENTION_HOURS: u64 = 72;

/// Interval between retention sweeps
const DEFAULT_CHAT_SWEEP_INTERVAL_SECS: u64 = 900;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Public URL of the frontend (also allowed as a CORS origin)
    pub frontend_url: Option<String>,

    /// Deployment hostname injected by the hosting platform
    pub vercel_url: Option<String>,

    /// Additional comma-separated CORS origins
    pub extra_cors_origins: Vec<String>,

    /// Chat retention; 0 disables purging
    pub chat_retention_hours: u64,
    pub chat_sweep_interval_secs: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            frontend_url: non_empty_var("FRONTEND_URL"),
            vercel_url: non_empty_var("VERCEL_URL"),
            extra_cors_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),

            chat_retention_hours: parse_var("CHAT_RETENTION_HOURS", DEFAULT_CHAT_RETENTION_HOURS)?,
            chat_sweep_interval_secs: parse_var(
                "CHAT_SWEEP_INTERVAL_SECS",
                DEFAULT_CHAT_SWEEP_INTERVAL_SECS,
            )?,

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "lagentry=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }

    /// Every origin the API answers CORS requests for
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|o| o.to_string())
            .collect();

        if let Some(host) = &self.vercel_url {
            origins.push(format!("https://{}", host));
        }
        if let Some(url) = &self.frontend_url {
            origins.push(url.trim_end_matches('/').to_string());
        }
        origins.extend(self.extra_cors_origins.iter().cloned());

        let mut seen = std::collections::HashSet::new();
        origins.retain(|o| seen.insert(o.clone()));
        origins
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frontend_url: None,
            vercel_url: None,
            extra_cors_origins: Vec::new(),
            chat_retention_hours: DEFAULT_CHAT_RETENTION_HOURS,
            chat_sweep_interval_secs: DEFAULT_CHAT_SWEEP_INTERVAL_SECS,
            rust_log: "lagentry=debug".to_string(),
            port: 3000,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var(key: &str, default: u64) -> Result<u64> {
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a non-negative integer, got {:?}", key, raw)),
        None => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

use crate::error::{AppError, Result};
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://swearingly-pseudocubic-beth.ngrok-free.dev/api";
const DEFAULT_TIMEOUT_MS: &str = "10000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_ms: u64 = env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|_| AppError::ConfigError("Invalid REQUEST_TIMEOUT_MS value".to_string()))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

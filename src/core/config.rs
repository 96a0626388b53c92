use std::env;
use std::time::Duration;

use crate::shared::constants::{
    DEFAULT_PAGE_SIZE, DELETE_REFETCH_ATTEMPTS, DELETE_REFETCH_DELAY_MS, MAX_PAGE_SIZE,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub console: ConsoleConfig,
}

/// Blog backend connection settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Stored credential and, optionally, the principal it belongs to.
///
/// When the principal fields are absent they are decoded from the token claims.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub token: String,
    pub user_id: Option<i64>,
    pub role_id: Option<i64>,
    pub email: Option<String>,
}

/// Console behaviour knobs
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub page_size: usize,
    /// Number of refetch attempts after a successful delete
    pub delete_refetch_attempts: u32,
    /// Fixed delay between refetch attempts
    pub delete_refetch_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            session: SessionConfig::from_env()?,
            console: ConsoleConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("BLOG_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs = env::var("BLOG_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BLOG_API_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let token = env::var("SESSION_TOKEN")
            .map_err(|_| "SESSION_TOKEN environment variable is required".to_string())?;

        let user_id = optional_number("SESSION_USER_ID")?;
        let role_id = optional_number("SESSION_ROLE_ID")?;
        let email = env::var("SESSION_EMAIL").ok().filter(|s| !s.is_empty());

        Ok(Self {
            token,
            user_id,
            role_id,
            email,
        })
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, String> {
        let page_size = env::var("CONSOLE_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "CONSOLE_PAGE_SIZE must be a valid number".to_string())?
            .clamp(1, MAX_PAGE_SIZE);

        let delete_refetch_attempts = env::var("DELETE_REFETCH_ATTEMPTS")
            .unwrap_or_else(|_| DELETE_REFETCH_ATTEMPTS.to_string())
            .parse::<u32>()
            .map_err(|_| "DELETE_REFETCH_ATTEMPTS must be a valid number".to_string())?
            .max(1);

        let delete_refetch_delay_ms = env::var("DELETE_REFETCH_DELAY_MS")
            .unwrap_or_else(|_| DELETE_REFETCH_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "DELETE_REFETCH_DELAY_MS must be a valid number".to_string())?;

        Ok(Self {
            page_size,
            delete_refetch_attempts,
            delete_refetch_delay: Duration::from_millis(delete_refetch_delay_ms),
        })
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            delete_refetch_attempts: DELETE_REFETCH_ATTEMPTS,
            delete_refetch_delay: Duration::from_millis(DELETE_REFETCH_DELAY_MS),
        }
    }
}

fn optional_number(key: &str) -> Result<Option<i64>, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("{} must be a valid number", key)),
        _ => Ok(None),
    }
}

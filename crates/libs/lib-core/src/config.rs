//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The config is built once by the server and handed to the components that need
//! it; nothing reads it from a global.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//! # Ok::<(), String>(())
//! ```

use lib_utils::envs::{get_env, get_env_or, get_env_parse_or};

/// Default backend: SQLite file under `data/`.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/forms.db";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_MAX_PAGE_LIMIT: u32 = 100;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Store backend URL
    ///
    /// `sqlite:<path>` (or `sqlite::memory:`), `memory:`, or `file:<path>`.
    pub database_url: String,

    /// Address the HTTP server listens on
    pub bind_address: String,

    /// Page size used when the request omits or garbles `limit`
    pub default_page_limit: u32,

    /// Upper bound for `limit`; larger requests are clamped
    pub max_page_limit: u32,

    /// CORS origins allowed to call the API
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
            allowed_origins: vec!["http://localhost:8080".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let database_url = get_env_or("DATABASE_URL", &defaults.database_url);
        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);

        let default_page_limit = get_env_parse_or("DEFAULT_PAGE_LIMIT", defaults.default_page_limit)
            .map_err(|e| e.to_string())?;
        let max_page_limit = get_env_parse_or("MAX_PAGE_LIMIT", defaults.max_page_limit)
            .map_err(|e| e.to_string())?;

        let allowed_origins = match get_env("ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.allowed_origins,
        };

        Ok(Self {
            database_url,
            bind_address,
            default_page_limit,
            max_page_limit,
            allowed_origins,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err("DATABASE_URL must not be empty".to_string());
        }

        if self.max_page_limit < 1 {
            return Err("MAX_PAGE_LIMIT must be at least 1".to_string());
        }

        if self.default_page_limit < 1 || self.default_page_limit > self.max_page_limit {
            return Err(format!(
                "DEFAULT_PAGE_LIMIT must be between 1 and MAX_PAGE_LIMIT ({})",
                self.max_page_limit
            ));
        }

        Ok(())
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

//! Configuration management for Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
///
/// Built once in each binary's `main` and passed by reference into the
/// dispatcher and row creator. Missing variables become empty strings on
/// purpose: absence is not validated at startup and surfaces as a downstream
/// authorization or lookup failure instead.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Shared secret expected in API request bodies
    pub api_secret: String,
    /// Collection id of the Month database
    pub month_page: String,
    /// Collection id of the Year database
    pub year_page: String,
    /// Collection id of the Day database
    pub day_page: String,
    /// Collection id of the Week database
    pub week_page: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_secret: env::var("API_SECRET").unwrap_or_default(),
            month_page: env::var("MONTH_PAGE").unwrap_or_default(),
            year_page: env::var("YEAR_PAGE").unwrap_or_default(),
            day_page: env::var("DAY_PAGE").unwrap_or_default(),
            week_page: env::var("WEEK_PAGE").unwrap_or_default(),
        }
    }
}

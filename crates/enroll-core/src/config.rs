//! Client configuration.

use serde::{Deserialize, Serialize};
use std::env;

/// Fixed base endpoint of the hosted registration service.
pub const DEFAULT_BASE_URL: &str = "https://zod-with-crud.onrender.com/api";

const BASE_URL_ENV: &str = "ENROLL_API_BASE_URL";

/// Connection settings for [`crate::transport::ProfileTransport`]
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto. Stored without a
    /// trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Loads configuration from the environment.
    ///
    /// Priority:
    /// 1. `ENROLL_API_BASE_URL` environment variable
    /// 2. The fixed production endpoint
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Overrides the base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

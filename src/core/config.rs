use std::env;
use std::time::Duration;

use crate::errors::ResourceError;

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_api_url: String,
    /// `None` means requests may block indefinitely.
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slack_api_url: DEFAULT_SLACK_API_URL.to_string(),
            http_timeout: Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ResourceError::Config` if `SLACK_HTTP_TIMEOUT_SECS` is not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self, ResourceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ResourceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let slack_api_url = lookup("SLACK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string());

        let http_timeout = match lookup("SLACK_HTTP_TIMEOUT_SECS") {
            None => Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ResourceError::Config(format!("SLACK_HTTP_TIMEOUT_SECS: {e}"))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        Ok(Self {
            slack_api_url,
            http_timeout,
        })
    }
}

//! Client configuration.
//!
//! Use the builder pattern to customize a [`SearchConfig`], or read it from
//! the environment with [`SearchConfig::from_env`].
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `PROSPECT_API_URL` | Base URL of the search service | `http://localhost:8000` |
//! | `PROSPECT_API_TOKEN` | Bearer token | none |
//! | `PROSPECT_IDLE_TIMEOUT_SECS` | Max silence between chunks, `0` disables | `120` |
//! | `PROSPECT_SSE_BLANK_LINE` | Use blank-line frame dispatch | off |

use std::time::Duration;

use crate::error::{SearchError, SearchResult};
use crate::models::SearchKind;
use crate::sse::DispatchMode;

pub const ENV_API_URL: &str = "PROSPECT_API_URL";
pub const ENV_API_TOKEN: &str = "PROSPECT_API_TOKEN";
pub const ENV_IDLE_TIMEOUT: &str = "PROSPECT_IDLE_TIMEOUT_SECS";
pub const ENV_BLANK_LINE: &str = "PROSPECT_SSE_BLANK_LINE";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 120;

/// Configuration for [`crate::client::SearchClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use prospect_stream::config::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_base_url("https://api.example.com/")
///     .with_idle_timeout(Some(Duration::from_secs(30)));
/// assert_eq!(config.base_url, "https://api.example.com");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub api_token: Option<String>,
    /// Longest silence tolerated between body chunks; `None` waits forever
    pub idle_timeout: Option<Duration>,
    /// Frame dispatch rule for the decoder
    pub dispatch_mode: DispatchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            idle_timeout: Some(Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS)),
            dispatch_mode: DispatchMode::default(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the idle timeout (`None` disables it).
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the frame dispatch rule.
    pub fn with_dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.dispatch_mode = mode;
        self
    }

    /// Full URL of the search endpoint for `kind`.
    pub fn endpoint(&self, kind: SearchKind) -> String {
        format!("{}/v1/search/{}", self.base_url, kind.path_segment())
    }

    /// Read configuration from `PROSPECT_*` environment variables.
    pub fn from_env() -> SearchResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Unset and empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SearchError::config(
                    ENV_API_URL,
                    format!("expected an http(s) URL, got '{}'", url),
                ));
            }
            config = config.with_base_url(url);
        }

        if let Some(token) = get(ENV_API_TOKEN) {
            config = config.with_api_token(token.trim());
        }

        if let Some(raw) = get(ENV_IDLE_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                SearchError::config(ENV_IDLE_TIMEOUT, format!("'{}' is not a number of seconds", raw))
            })?;
            let timeout = (secs > 0).then(|| Duration::from_secs(secs));
            config = config.with_idle_timeout(timeout);
        }

        if let Some(raw) = get(ENV_BLANK_LINE) {
            let mode = if parse_flag(&raw).ok_or_else(|| {
                SearchError::config(ENV_BLANK_LINE, format!("'{}' is not a boolean", raw))
            })? {
                DispatchMode::BlankLine
            } else {
                DispatchMode::PerDataLine
            };
            config = config.with_dispatch_mode(mode);
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

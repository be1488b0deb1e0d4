// src/config.rs
// =============================================================================
// Validated crawler settings.
//
// The CLI fills a CrawlerConfig, and everything is checked here before a
// single request goes out. A bad root URL or a zero concurrency is a startup
// error, never something the crawl discovers halfway through.
// =============================================================================

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid root URL '{url}': {source}")]
    InvalidRootUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("root URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("root URL has no host: {0}")]
    MissingHost(String),

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrawlerConfig {
    /// Maximum number of page downloads in flight at once
    pub concurrency: usize,

    /// Attempts per request, including the first one
    pub max_attempts: u32,

    /// Total time allowed for one request
    pub timeout_secs: u64,

    /// Time allowed to establish the connection
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            max_attempts: 3,
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl CrawlerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Zero("concurrency"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Zero("max-attempts"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero("timeout"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero("connect-timeout"));
        }
        Ok(())
    }
}

// Parses the crawl's starting point; only absolute http(s) URLs with a host
pub fn parse_root_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidRootUrl {
        url: raw.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::MissingHost(raw.to_string()));
    }

    Ok(url)
}

// src/fetcher/client.rs
// =============================================================================
// The HTTP transport used by the fetcher.
//
// HttpClient is the seam between the crawler and the network. The production
// implementation, RetryingClient, wraps a single reqwest::Client (so TCP/TLS
// connections are pooled across the whole crawl) and adds:
// - a random browser User-Agent on every request
// - a total request timeout and a separate connect timeout
// - bounded retries with exponential backoff on transport errors and 5xx
//
// Non-2xx responses are NOT errors here. The status and content type are
// handed back to the fetcher, which decides what to do with them. The body
// stays on the wire until the fetcher asks for it, so a 404 page or a zip
// file is never downloaded.
// =============================================================================

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::user_agent::random_user_agent;
use crate::config::CrawlerConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request failed after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

// Status line and headers of a response; the body is read on demand
pub struct HttpResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    body: BoxFuture<'static, Result<String, FetchError>>,
}

impl HttpResponse {
    // `body` is not polled until `text()` is called
    pub fn new<B>(status: StatusCode, content_type: Option<String>, body: B) -> Self
    where
        B: Future<Output = Result<String, FetchError>> + Send + 'static,
    {
        Self {
            status,
            content_type,
            body: body.boxed(),
        }
    }

    /// Downloads the body. Dropping the response instead discards it unread.
    pub async fn text(self) -> Result<String, FetchError> {
        self.body.await
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Exponential backoff: `start_delay * factor^(retry - 1)`, capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub start_delay: Duration,
    pub factor: u32,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            start_delay: Duration::from_millis(100),
            factor: 2,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    // Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let multiplier = self.factor.saturating_pow(exponent);
        self.start_delay
            .saturating_mul(multiplier)
            .min(self.max_delay)
    }
}

pub struct RetryingClient {
    client: Client,
    retry: RetryPolicy,
}

impl RetryingClient {
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(FetchError::Build)?;

        Ok(Self {
            client,
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                ..RetryPolicy::default()
            },
        })
    }
}

#[async_trait]
impl HttpClient for RetryingClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let last_attempt = attempt >= self.retry.max_attempts;

            let result = self
                .client
                .get(url)
                .header(USER_AGENT, random_user_agent())
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_server_error() && !last_attempt => {
                    tracing::debug!(
                        url,
                        attempt,
                        status = response.status().as_u16(),
                        "server error, retrying"
                    );
                }
                Ok(response) => {
                    let status = response.status();
                    let content_type = response
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    let body = async move { response.text().await.map_err(FetchError::Body) };

                    return Ok(HttpResponse::new(status, content_type, body));
                }
                Err(e) if !last_attempt => {
                    tracing::debug!(url, attempt, error = %e, "request failed, retrying");
                }
                Err(source) => {
                    return Err(FetchError::Transport {
                        attempts: attempt,
                        source,
                    });
                }
            }

            tokio::time::sleep(self.retry.delay_after(attempt)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(max_attempts: u32) -> RetryingClient {
        let config = CrawlerConfig {
            max_attempts,
            ..CrawlerConfig::default()
        };
        RetryingClient::new(&config).unwrap()
    }

    #[test]
    fn test_default_configuration() {
        let client = client(4);
        assert_eq!(client.retry.max_attempts, 4);
        assert_eq!(client.retry.start_delay, RetryPolicy::default().start_delay);

        let config = CrawlerConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.connect_timeout_secs, 5);
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(400));
        assert_eq!(policy.delay_after(40), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_non_2xx_is_returned_as_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(3)
            .get(&format!("{}/missing", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sends_user_agent_and_reads_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_exists("user-agent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<p>hi</p>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let response = client(1).get(&server.uri()).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        // wiremock may rewrite the parameter spacing, only the mime type is stable
        let content_type = response.content_type.clone().unwrap_or_default();
        assert!(content_type.contains("text/html"), "got {content_type:?}");
        assert_eq!(response.text().await.unwrap(), "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("ok", "text/html"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(3).get(&server.uri()).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_last_server_error_is_returned_as_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let response = client(2).get(&server.uri()).await.unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_connection_failure_exhausts_retries() {
        // Nothing listens on port 1
        let err = client(2).get("http://127.0.0.1:1/").await.unwrap_err();
        match err {
            FetchError::Transport { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}

// src/fetcher/mod.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// Key functionality:
// - Bounds the number of in-flight requests with a global semaphore
// - Only downloads a body for "200 OK" responses whose content type is HTML;
//   everything else is judged on the status line and headers alone
// - Swallows transport errors (after logging them): one dead page must never
//   stop the crawl
//
// Submodules:
// - client: the HttpClient trait and the retrying reqwest implementation
// - user_agent: the pool of browser identities
// =============================================================================

mod client;
mod user_agent;

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::Semaphore;

pub use client::{FetchError, HttpClient, HttpResponse, RetryingClient};

const TEXT_HTML: &str = "text/html";

pub struct Fetcher {
    client: Arc<dyn HttpClient>,
    limiter: Arc<Semaphore>,
}

impl Fetcher {
    // `concurrency` is the maximum number of requests in flight at once
    pub fn new(client: Arc<dyn HttpClient>, concurrency: usize) -> Self {
        Self {
            client,
            limiter: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Number of request slots currently free.
    pub fn available_slots(&self) -> usize {
        self.limiter.available_permits()
    }

    // Fetches `url` and returns its HTML, or None for anything else
    //
    // The permit covers the request and the body download and is released
    // when `_permit` goes out of scope, whichever way we leave this function.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let Ok(_permit) = self.limiter.acquire().await else {
            tracing::error!(url, "request limiter closed");
            return None;
        };

        let response = match self.client.get(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(url, error = %e, "Error fetching page");
                return None;
            }
        };

        if !is_html_page(&response) {
            tracing::debug!(
                url,
                status = response.status.as_u16(),
                content_type = response.content_type.as_deref().unwrap_or(""),
                "skipping non-HTML response"
            );
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!(url, error = %e, "Error fetching page");
                None
            }
        }
    }
}

// "200 OK" with a text/html content type
fn is_html_page(response: &HttpResponse) -> bool {
    let is_html = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains(TEXT_HTML));

    response.status == StatusCode::OK && is_html
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Who releases the semaphore permit?
//    - Nobody calls "release": the SemaphorePermit gives its slot back in Drop
//    - Early `return None`s and panics can't leak a slot
//
// 2. What does `let Ok(x) = expr else { ... };` do?
//    - It binds `x` on success, and the else branch must leave the function
//    - A guard clause without an extra level of nesting
//
// 3. Why is the body read separately?
//    - HttpResponse::text() consumes the response and only then downloads
//    - When we return early the response is dropped and the body never
//      comes off the connection
//
// 4. Why Arc<dyn HttpClient>?
//    - The fetcher doesn't care which transport it talks to
//    - Production passes a RetryingClient, the tests below pass small fakes
// -----------------------------------------------------------------------------

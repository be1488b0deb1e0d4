// src/crawl/orchestrator.rs
// =============================================================================
// This module drives the crawl.
//
// How it works:
// 1. Claim the URL in the visited set (skip it if someone already did)
// 2. Fetch the page; stop this branch if it isn't HTML
// 3. Extract same-site links and drop the undesirable ones
// 4. Spawn one task per remaining link and wait for all of them
//
// Every page is its own tokio task, so deep sites never grow the call stack,
// and a page is only "done" once its whole discovered subtree is done.
// The fetcher's semaphore is the only thing bounding parallel downloads;
// extraction and bookkeeping are never throttled.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::Instrument;
use url::Url;

use super::visited::VisitedSet;
use crate::config::CrawlerConfig;
use crate::fetcher::{FetchError, Fetcher, HttpClient, RetryingClient};
use crate::links::{extract, is_undesirable};
use crate::root::RootContext;

// Summary of a finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub root_url: String,
    /// Every URL the crawl claimed, sorted
    pub visited: Vec<String>,
    /// Pages that came back as HTML and were expanded
    pub pages_fetched: usize,
    /// Pages that failed or were not HTML
    pub pages_failed: usize,
}

// State shared by every crawl task
struct Shared {
    root: RootContext,
    visited: VisitedSet,
    fetcher: Fetcher,
    pages_fetched: AtomicUsize,
    pages_failed: AtomicUsize,
}

pub struct Crawler {
    shared: Arc<Shared>,
}

impl Crawler {
    // Builds a crawler that talks to the network through reqwest
    pub fn new(root_url: Url, config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = RetryingClient::new(config)?;
        Ok(Self::with_client(root_url, Arc::new(client), config.concurrency))
    }

    pub fn with_client(root_url: Url, client: Arc<dyn HttpClient>, concurrency: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                root: RootContext::new(root_url),
                visited: VisitedSet::new(),
                fetcher: Fetcher::new(client, concurrency),
                pages_fetched: AtomicUsize::new(0),
                pages_failed: AtomicUsize::new(0),
            }),
        }
    }

    // Crawls the whole reachable site and returns once every branch is done
    pub async fn start(&self) -> CrawlReport {
        let root_url = self.shared.root.root_url().to_string();
        let span = tracing::info_span!("crawl", root = %root_url);

        async {
            tracing::info!("Crawling process is started for {}", root_url);
            crawl(self.shared.clone(), root_url.clone()).await;
            tracing::info!(
                visited = self.shared.visited.len(),
                "Crawling process is finished."
            );
        }
        .instrument(span)
        .await;

        self.report()
    }

    pub fn report(&self) -> CrawlReport {
        CrawlReport {
            root_url: self.shared.root.root_url().to_string(),
            visited: self.shared.visited.snapshot(),
            pages_fetched: self.shared.pages_fetched.load(Ordering::SeqCst),
            pages_failed: self.shared.pages_failed.load(Ordering::SeqCst),
        }
    }
}

// One crawl branch. Boxed because it spawns copies of itself.
fn crawl(shared: Arc<Shared>, url: String) -> BoxFuture<'static, ()> {
    async move {
        if !shared.visited.insert(&url) {
            return;
        }

        tracing::info!("Visiting: {}", url);

        let Some(html) = shared.fetcher.fetch(&url).await else {
            shared.pages_failed.fetch_add(1, Ordering::SeqCst);
            return;
        };
        shared.pages_fetched.fetch_add(1, Ordering::SeqCst);

        let page_urls = extract(&shared.root, &html);
        tracing::info!(
            "Done {}. {} URLs found. {}",
            url,
            page_urls.len(),
            page_urls.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        );

        let mut children = JoinSet::new();
        for link in page_urls.into_iter().filter(|link| !is_undesirable(link)) {
            children.spawn(crawl(shared.clone(), link).in_current_span());
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!(parent = %url, error = %e, "crawl task failed");
            }
        }
    }
    .boxed()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does crawl() return a BoxFuture?
//    - An async fn that calls itself would have a future type containing
//      itself, which has no finite size
//    - Boxing puts the future on the heap and breaks the cycle
//
// 2. Why Arc<Shared>?
//    - Spawned tasks must be 'static, so they can't borrow from the Crawler
//    - Every task holds a clone of the Arc; all clones point at the same
//      visited set, fetcher and counters
//
// 3. What is a JoinSet?
//    - It owns the child tasks of one page
//    - join_next() hands back each child as it finishes
//    - A child that panicked comes back as Err(JoinError) instead of taking
//      the parent down
//
// 4. What does in_current_span() do?
//    - Spawned tasks don't inherit the caller's tracing span on their own
//    - Wrapping the future attaches the crawl{root=...} span, so every log
//      line says which crawl it belongs to
// -----------------------------------------------------------------------------

// src/crawl/mod.rs
// =============================================================================
// This module handles the site traversal itself.
//
// Features:
// - Recursive crawling starting from the root URL, one task per page
// - Every URL is fetched at most once, even when many pages link to it
// - Only same-site, page-like links are followed
//
// Submodules:
// - orchestrator: the Crawler and its recursive crawl procedure
// - visited: the shared set of claimed URLs
// =============================================================================

mod orchestrator;
mod visited;

pub use orchestrator::{CrawlReport, Crawler};
pub use visited::VisitedSet;

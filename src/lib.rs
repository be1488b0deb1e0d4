// src/lib.rs
// =============================================================================
// site-crawler: crawls every reachable page of one website.
//
// Data flow for a single page:
//   crawl::Crawler -> VisitedSet (claim) -> fetcher::Fetcher
//     -> links::extract -> links::is_undesirable -> back to the Crawler
// =============================================================================

pub mod config;
pub mod crawl;
pub mod fetcher;
pub mod links;
pub mod logging;
pub mod root;

pub use config::{ConfigError, CrawlerConfig};
pub use crawl::{CrawlReport, Crawler};

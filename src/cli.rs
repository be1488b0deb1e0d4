// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Usage:
//   site-crawler https://example.com --concurrency 10
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use site_crawler::CrawlerConfig;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl every reachable page of a single website",
    long_about = "site-crawler starts at ROOT_URL, follows every link that stays on the same \
                  scheme, host and port, and visits each page exactly once."
)]
pub struct Cli {
    /// Root URL to start crawling from (e.g., https://example.com)
    ///
    /// This is a positional argument (required, no flag needed)
    pub root_url: String,

    /// Maximum number of pages downloaded at the same time
    ///
    /// value_parser rejects 0 before the crawl starts
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: u64,

    /// Attempts per request before giving up (first try included)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Total timeout for one request, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Timeout for establishing a connection, in seconds
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout: u64,

    /// Print the crawl report as JSON on stdout when the crawl is done
    #[arg(long)]
    pub json: bool,

    /// Directory for the daily rolling debug log
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
}

impl Cli {
    // Turns the parsed flags into crawler settings
    pub fn config(&self) -> CrawlerConfig {
        CrawlerConfig {
            concurrency: usize::try_from(self.concurrency).unwrap_or(usize::MAX),
            max_attempts: self.max_attempts,
            timeout_secs: self.timeout,
            connect_timeout_secs: self.connect_timeout,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is concurrency a u64 here but a usize in CrawlerConfig?
//    - clap's ranged value parsers work on fixed-width integers
//    - The semaphore wants a usize, so we convert once in config()
//
// 2. What does value_parser!(u64).range(1..) do?
//    - It parses the flag as a number AND checks it is at least 1
//    - A bad value makes clap print a usage error and exit with code 2
// -----------------------------------------------------------------------------

// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr + a daily file), validate the root URL and settings (bad input stops us right here)
// 3. Run the crawl until every reachable page has been visited
// 4. Print a summary and exit (0 = crawl finished, 2 = startup error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use site_crawler::config::parse_root_url;
use site_crawler::{logging, CrawlReport, Crawler};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    // clap exits with code 2 by itself on usage errors
    let cli = Cli::parse();
    // Dropping the guard flushes the log file, so it lives until run() returns
    let _guard = logging::init(&cli.log_dir)?;

    let config = cli.config();
    config.validate()?;
    let root_url = parse_root_url(&cli.root_url)?;

    let crawler = Crawler::new(root_url, &config).context("could not set up the HTTP client")?;
    let report = crawler.start().await;

    print_report(&report, cli.json)
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("📊 Summary for {}:", report.root_url);
        println!("   🔗 Visited: {}", report.visited.len());
        println!("   ✅ HTML pages: {}", report.pages_fetched);
        println!("   ❌ Failed or not HTML: {}", report.pages_failed);
    }
    Ok(())
}

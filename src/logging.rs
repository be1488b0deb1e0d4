// src/logging.rs
// =============================================================================
// Log sink setup for the binary. The library only emits `tracing` events.
//
// Two layers share one registry:
// - stderr at info (RUST_LOG overrides it), so `--json` on stdout stays clean
// - a daily rolling file at debug for this crate, info for dependencies
//
// The file is written from a background thread. The returned WorkerGuard
// flushes it on drop, so main has to hold it until the crawl is over.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Rolled files are named `site-crawler.log.YYYY-MM-DD`
pub const LOG_FILE_PREFIX: &str = "site-crawler.log";

const FILE_FILTER: &str = "info,site_crawler=debug";

pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    let (file_writer, guard) = file_writer(log_dir)?;

    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(stderr_filter),
        )
        .with(file_layer(file_writer))
        .try_init()
        .context("a global logger is already installed")?;

    Ok(guard)
}

fn file_writer(log_dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;

    Ok(non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX)))
}

fn file_layer<S>(writer: NonBlocking) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(EnvFilter::new(FILE_FILTER))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a "layer"?
//    - A registry collects spans and events; layers decide where they go
//    - Each layer here carries its own filter, so the file can be chattier
//      than the terminal without one affecting the other
//
// 2. Why non_blocking?
//    - Writing to disk can stall; the crawl tasks shouldn't wait for it
//    - Events are queued to a worker thread, and the WorkerGuard is what
//      tells that thread to flush and stop
//    - Dropping the guard early (e.g. `let _ = init(..)`) loses log lines
// -----------------------------------------------------------------------------

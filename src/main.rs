//! # PBH Torrent Feeds
//!
//! Generates BEP-0036 torrent RSS feeds from a snapshot of the
//! PeerBanHelper GitHub releases, so torrent clients can auto-download new
//! releases by subscribing to a feed.
//!
//! ## Usage
//!
//! ```sh
//! pbh_torrent_feeds -r releases.json -o feeds
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Loading**: Decode the releases snapshot and normalize it (drop
//!    drafts and releases without a torrent attachment, sort newest-first,
//!    cap the entry count)
//! 2. **Rendering**: Produce one RSS 2.0 document per feed variant
//!    (stable/pre-release crossed with direct/mirror download links)
//! 3. **Output**: Write the four variant files (parallel, independent; a
//!    failed variant never blocks the others)

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod markdown;
mod models;
mod outputs;
mod releases;
mod utils;

use cli::Cli;
use outputs::rss::{self, FEED_VARIANTS};
use releases::load_releases;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed generation starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.releases_file, ?args.output_dir, args.max_entries, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Load and normalize the release snapshot ----
    // An unavailable or malformed snapshot degrades to empty feeds rather
    // than aborting: subscribers keep a valid (if empty) document.
    let entries = match load_releases(&args.releases_file, args.max_entries).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %args.releases_file, error = %e, "Releases unavailable; generating empty feeds");
            Vec::new()
        }
    };
    info!(count = entries.len(), "Valid releases loaded");

    // ---- Render and write the four feed variants ----
    // The variants are independent pure transforms over the same immutable
    // entry list, so they run concurrently.
    let results: Vec<bool> = stream::iter(FEED_VARIANTS)
        .map(|variant| {
            let entries = &entries;
            let output_dir = &args.output_dir;
            async move {
                let path = format!("{}/{}", output_dir, variant.filename);
                let xml = match rss::render_feed(
                    entries,
                    variant.include_prerelease,
                    variant.use_mirror,
                ) {
                    Ok(xml) => xml,
                    Err(e) => {
                        error!(path = %path, error = %e, "Failed to render feed");
                        return false;
                    }
                };
                match rss::write_feed(&xml, &path).await {
                    Ok(()) => {
                        info!(path = %path, "Generated feed");
                        true
                    }
                    Err(e) => {
                        error!(path = %path, error = %e, "Failed to write feed");
                        false
                    }
                }
            }
        })
        .buffer_unordered(FEED_VARIANTS.len())
        .collect()
        .await;

    let succeeded = results.iter().filter(|ok| **ok).count();
    let failed = results.len() - succeeded;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        feeds = results.len(),
        succeeded,
        failed,
        "Feed generation complete"
    );

    Ok(())
}

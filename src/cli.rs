//! Command-line interface definitions for the feed generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the feed generator.
///
/// # Examples
///
/// ```sh
/// # Defaults: read ./releases.json, write into ./feeds
/// pbh_torrent_feeds
///
/// # Explicit snapshot and output locations
/// pbh_torrent_feeds -r ./snapshot/releases.json -o ./public/feeds
///
/// # Shorter feeds
/// pbh_torrent_feeds --max-entries 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the GitHub releases snapshot JSON
    #[arg(short, long, default_value = "releases.json")]
    pub releases_file: String,

    /// Output directory for the generated feed XML files
    #[arg(short, long, default_value = "feeds")]
    pub output_dir: String,

    /// Maximum number of releases included in each feed
    #[arg(long, default_value_t = 50)]
    pub max_entries: usize,
}

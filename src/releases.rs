//! Release snapshot loading and normalization.
//!
//! This module turns the raw GitHub releases snapshot (`releases.json`, an
//! already-fetched copy of the releases API response) into the ordered list
//! of [`FeedEntry`] values the feed renderer consumes.
//!
//! # Filtering Rules
//!
//! A release survives normalization only if it:
//! - is not a draft,
//! - carries the `peerbanhelper.torrent` attachment,
//! - has a parseable `published_at` timestamp.
//!
//! Anything else is skipped with a log line; one bad record never fails the
//! batch. Survivors are sorted newest-first (stable, so same-timestamp
//! releases keep their snapshot order) and capped at `max_entries`.

use crate::markdown;
use crate::models::{FeedEntry, RawRelease};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::utils::truncate_for_log;

/// Why the release snapshot could not be loaded at all.
///
/// Both variants are recoverable: the orchestrator degrades to an empty
/// entry list and still writes (empty) feeds.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The snapshot file is missing or unreadable.
    #[error("releases snapshot unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    /// The snapshot file is not a valid JSON array.
    #[error("releases snapshot malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load the releases snapshot and normalize it into feed entries.
///
/// # Arguments
///
/// * `path` - Path of the snapshot JSON file
/// * `max_entries` - Maximum number of entries to keep after sorting
///
/// # Returns
///
/// The normalized entries, newest first, at most `max_entries` long, or a
/// [`LoadError`] when the snapshot itself cannot be obtained or decoded.
#[instrument(level = "info", skip_all, fields(%path, max_entries))]
pub async fn load_releases(path: &str, max_entries: usize) -> Result<Vec<FeedEntry>, LoadError> {
    let raw = fs::read_to_string(path).await?;
    let records: Vec<Value> = serde_json::from_str(&raw)?;
    info!(count = records.len(), "Decoded release snapshot");
    Ok(normalize_releases(records, max_entries))
}

/// Filter, normalize, sort, and truncate raw release records.
///
/// Records are decoded individually so a single malformed record is skipped
/// (with a warning) instead of poisoning the whole snapshot.
pub fn normalize_releases(records: Vec<Value>, max_entries: usize) -> Vec<FeedEntry> {
    let total = records.len();
    let mut entries = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let release = match RawRelease::deserialize(&record) {
            Ok(release) => release,
            Err(e) => {
                warn!(
                    index,
                    error = %e,
                    record_preview = %truncate_for_log(&record.to_string(), 200),
                    "Skipping undecodable release record"
                );
                continue;
            }
        };

        if release.draft {
            debug!(index, tag = %release.tag_name, "Skipping draft release");
            continue;
        }

        let Some(asset) = release.torrent_asset() else {
            debug!(index, tag = %release.tag_name, "Skipping release without torrent attachment");
            continue;
        };
        let size = asset.size;

        let pub_date = match release.published_at.parse::<DateTime<Utc>>() {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    index,
                    tag = %release.tag_name,
                    published_at = %release.published_at,
                    error = %e,
                    "Skipping release with unparseable publish date"
                );
                continue;
            }
        };

        let title = release.display_title().to_string();
        let description = markdown::to_html(release.body.as_deref().unwrap_or(""));

        entries.push(FeedEntry {
            title,
            description,
            pub_date,
            is_prerelease: release.prerelease,
            html_url: release.html_url,
            size,
            tag_name: release.tag_name,
        });
    }

    // Stable sort: same-timestamp releases keep their snapshot order.
    entries.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    entries.truncate(max_entries);

    info!(kept = entries.len(), total, "Normalized release records");
    entries
}

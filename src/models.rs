//! Data models for GitHub releases and their normalized feed representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawRelease`]: A release record as it appears in the GitHub API snapshot
//! - [`ReleaseAsset`]: A binary attachment of a release
//! - [`FeedEntry`]: A validated, normalized release ready for feed rendering
//!
//! It also carries the fixed constants of the published feeds: the required
//! torrent attachment name and the download/mirror URL templates.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Filename of the torrent attachment a release must carry to be listed.
///
/// Matching is exact and case-sensitive; releases without an asset of this
/// name are excluded from every feed.
pub const TORRENT_ASSET_NAME: &str = "peerbanhelper.torrent";

/// Base of the GitHub download URL for release attachments.
pub const TORRENT_URL_BASE: &str =
    "https://github.com/PBH-BTN/PeerBanHelper/releases/download";

/// Proxy prefix prepended to the download URL in the mirror feed variants.
pub const MIRROR_URL_PREFIX: &str = "https://ghfast.top/";

/// A release record as decoded from the GitHub releases snapshot.
///
/// Field optionality mirrors what the GitHub API actually returns: only
/// `tag_name` is required, everything else degrades to an empty/default
/// value so that a sparse record can still be inspected (and then skipped
/// by the loader if it fails validation).
#[derive(Debug, Deserialize)]
pub struct RawRelease {
    /// Human-readable release title; releases are often published without one.
    pub name: Option<String>,
    /// Git tag of the release, e.g. `v7.2.0`.
    pub tag_name: String,
    /// Release notes in GitHub-flavored markdown.
    #[serde(default)]
    pub body: Option<String>,
    /// Publication timestamp, RFC 3339 with a `Z` suffix.
    #[serde(default)]
    pub published_at: String,
    /// Whether GitHub marks this release as a pre-release.
    #[serde(default)]
    pub prerelease: bool,
    /// Draft releases are invisible to the public and never listed.
    #[serde(default)]
    pub draft: bool,
    /// Web page of the release.
    #[serde(default)]
    pub html_url: String,
    /// Binary attachments, in upload order.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A binary attachment of a release.
#[derive(Debug, Deserialize)]
pub struct ReleaseAsset {
    /// Attachment filename.
    pub name: String,
    /// Attachment size in bytes.
    pub size: u64,
}

impl RawRelease {
    /// Find the torrent attachment of this release, if any.
    ///
    /// Returns the first asset named [`TORRENT_ASSET_NAME`]. Duplicate
    /// attachment names are not expected on GitHub releases.
    pub fn torrent_asset(&self) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == TORRENT_ASSET_NAME)
    }

    /// Title shown in the feed: `name`, falling back to `tag_name` when the
    /// release was published without a name (or with an empty one).
    pub fn display_title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

/// A validated release, normalized for feed rendering.
///
/// Entries are built once by the loader, sorted newest-first, and then
/// only read by the four renderer invocations. The download URLs are pure
/// functions of `tag_name` and are derived on demand.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// Feed item title (release name or tag).
    pub title: String,
    /// Release notes rendered to HTML.
    pub description: String,
    /// Parsed publication timestamp, the sort key of the feed.
    pub pub_date: DateTime<Utc>,
    /// Whether this entry is a pre-release.
    pub is_prerelease: bool,
    /// Web page of the release, used as the item link.
    pub html_url: String,
    /// Size of the torrent attachment in bytes.
    pub size: u64,
    /// Git tag, the input to the URL derivations.
    pub tag_name: String,
}

impl FeedEntry {
    /// Direct GitHub download URL of the torrent attachment.
    pub fn torrent_url(&self) -> String {
        format!("{TORRENT_URL_BASE}/{}/{TORRENT_ASSET_NAME}", self.tag_name)
    }

    /// Mirror-proxied variant of [`FeedEntry::torrent_url`].
    pub fn mirror_url(&self) -> String {
        format!("{MIRROR_URL_PREFIX}{}", self.torrent_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: &str) -> FeedEntry {
        FeedEntry {
            title: "Test".to_string(),
            description: String::new(),
            pub_date: "2024-01-01T00:00:00Z".parse().unwrap(),
            is_prerelease: false,
            html_url: "https://example.com".to_string(),
            size: 0,
            tag_name: tag.to_string(),
        }
    }

    #[test]
    fn test_raw_release_deserialization() {
        let json = r#"{
            "name": "Version 1",
            "tag_name": "v1",
            "body": "**bold**",
            "published_at": "2024-01-01T00:00:00Z",
            "prerelease": false,
            "draft": false,
            "html_url": "https://x/1",
            "assets": [{"name": "peerbanhelper.torrent", "size": 1000}]
        }"#;

        let release: RawRelease = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1");
        assert_eq!(release.name.as_deref(), Some("Version 1"));
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].size, 1000);
    }

    #[test]
    fn test_raw_release_sparse_record_uses_defaults() {
        let release: RawRelease = serde_json::from_str(r#"{"tag_name": "v2"}"#).unwrap();
        assert_eq!(release.tag_name, "v2");
        assert!(release.name.is_none());
        assert!(release.body.is_none());
        assert_eq!(release.published_at, "");
        assert!(!release.prerelease);
        assert!(!release.draft);
        assert!(release.assets.is_empty());
    }

    #[test]
    fn test_raw_release_missing_tag_is_an_error() {
        let result: Result<RawRelease, _> = serde_json::from_str(r#"{"name": "no tag"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_torrent_asset_exact_match_only() {
        let release: RawRelease = serde_json::from_str(
            r#"{
                "tag_name": "v1",
                "assets": [
                    {"name": "PeerBanHelper.torrent", "size": 1},
                    {"name": "peerbanhelper.torrent", "size": 2},
                    {"name": "checksums.txt", "size": 3}
                ]
            }"#,
        )
        .unwrap();

        let asset = release.torrent_asset().unwrap();
        assert_eq!(asset.size, 2);
    }

    #[test]
    fn test_torrent_asset_absent() {
        let release: RawRelease =
            serde_json::from_str(r#"{"tag_name": "v1", "assets": [{"name": "x.zip", "size": 9}]}"#)
                .unwrap();
        assert!(release.torrent_asset().is_none());
    }

    #[test]
    fn test_display_title_prefers_name() {
        let release: RawRelease =
            serde_json::from_str(r#"{"name": "Version 1", "tag_name": "v1"}"#).unwrap();
        assert_eq!(release.display_title(), "Version 1");
    }

    #[test]
    fn test_display_title_falls_back_on_missing_name() {
        let release: RawRelease = serde_json::from_str(r#"{"tag_name": "v1"}"#).unwrap();
        assert_eq!(release.display_title(), "v1");
    }

    #[test]
    fn test_display_title_falls_back_on_empty_name() {
        let release: RawRelease =
            serde_json::from_str(r#"{"name": "", "tag_name": "v1"}"#).unwrap();
        assert_eq!(release.display_title(), "v1");
    }

    #[test]
    fn test_torrent_url_template() {
        assert_eq!(
            entry("v1").torrent_url(),
            "https://github.com/PBH-BTN/PeerBanHelper/releases/download/v1/peerbanhelper.torrent"
        );
    }

    #[test]
    fn test_mirror_url_prefixes_torrent_url() {
        assert_eq!(
            entry("v7.2.0").mirror_url(),
            "https://ghfast.top/https://github.com/PBH-BTN/PeerBanHelper/releases/download/v7.2.0/peerbanhelper.torrent"
        );
    }
}

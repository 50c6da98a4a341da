//! RSS 2.0 feed rendering and file output.
//!
//! Implements the BEP-0036 torrent feed convention
//! (<https://www.bittorrent.org/beps/bep_0036.html>): each item carries an
//! `enclosure` pointing at the release's torrent attachment, so a torrent
//! client subscribed to the feed picks up new releases automatically.
//!
//! Rendering is a pure transform from the normalized entry list plus two
//! flags to XML text; the only I/O lives in [`write_feed`].

use crate::models::FeedEntry;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use std::io;
use tokio::fs;
use tracing::{info, instrument};

/// Base channel title shared by all four feed variants.
pub const CHANNEL_TITLE: &str = "PeerBanHelper Releases";

/// The releases listing page, used as the channel `link`.
pub const CHANNEL_LINK: &str = "https://github.com/PBH-BTN/PeerBanHelper/releases";

/// MIME type advertised on the torrent enclosure.
pub const TORRENT_MIME_TYPE: &str = "application/x-bittorrent";

/// One of the four published feed flavors.
#[derive(Debug, Clone, Copy)]
pub struct FeedVariant {
    /// Output filename, relative to the output directory.
    pub filename: &'static str,
    /// Whether pre-release entries are included.
    pub include_prerelease: bool,
    /// Whether enclosure URLs go through the download mirror.
    pub use_mirror: bool,
}

/// The four feed flavors, in the order they are published.
pub const FEED_VARIANTS: [FeedVariant; 4] = [
    FeedVariant {
        filename: "github.feed.xml",
        include_prerelease: false,
        use_mirror: false,
    },
    FeedVariant {
        filename: "github.feed.prerelease.xml",
        include_prerelease: true,
        use_mirror: false,
    },
    FeedVariant {
        filename: "mirror.feed.xml",
        include_prerelease: false,
        use_mirror: true,
    },
    FeedVariant {
        filename: "mirror.feed.prerelease.xml",
        include_prerelease: true,
        use_mirror: true,
    },
];

/// Channel title with the variant suffixes appended in fixed order.
fn channel_title(include_prerelease: bool, use_mirror: bool) -> String {
    let mut title = CHANNEL_TITLE.to_string();
    if use_mirror {
        title.push_str(" [Mirror]");
    }
    if include_prerelease {
        title.push_str(" (Including Pre-releases)");
    }
    title
}

/// Reformat a publish timestamp into the RFC 822 form RSS requires.
fn rfc822(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Render the normalized entries into a complete RSS 2.0 document.
///
/// Entries arrive newest-first from the loader and are emitted in that
/// order; pre-release entries are filtered out here when
/// `include_prerelease` is false. Titles and descriptions are XML-escaped
/// by the writer (descriptions keep their embedded HTML as escaped text,
/// which is how RSS carries HTML content).
///
/// # Returns
///
/// The document as indented UTF-8 text, with a trailing newline.
pub fn render_feed(
    entries: &[FeedEntry],
    include_prerelease: bool,
    use_mirror: bool,
) -> io::Result<String> {
    let title = channel_title(include_prerelease, use_mirror);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    writer
        .create_element("rss")
        .with_attribute(("version", "2.0"))
        .write_inner_content(|rss| {
            rss.create_element("channel")
                .write_inner_content(|channel| {
                    channel
                        .create_element("title")
                        .write_text_content(BytesText::new(&title))?;
                    channel
                        .create_element("link")
                        .write_text_content(BytesText::new(CHANNEL_LINK))?;
                    channel
                        .create_element("description")
                        .write_text_content(BytesText::new(&title))?;

                    for entry in entries {
                        if entry.is_prerelease && !include_prerelease {
                            continue;
                        }
                        write_item(channel, entry, use_mirror)?;
                    }
                    Ok(())
                })?;
            Ok(())
        })?;

    let mut xml = String::from_utf8(writer.into_inner()).expect("XML writer emits UTF-8");
    xml.push('\n');
    Ok(xml)
}

/// Write a single `item` element for one release.
fn write_item(
    writer: &mut Writer<Vec<u8>>,
    entry: &FeedEntry,
    use_mirror: bool,
) -> io::Result<()> {
    let enclosure_url = if use_mirror {
        entry.mirror_url()
    } else {
        entry.torrent_url()
    };
    let length = entry.size.to_string();

    writer
        .create_element("item")
        .write_inner_content(|item| {
            item.create_element("title")
                .write_text_content(BytesText::new(&entry.title))?;
            item.create_element("description")
                .write_text_content(BytesText::new(&entry.description))?;
            item.create_element("pubDate")
                .write_text_content(BytesText::new(&rfc822(entry.pub_date)))?;
            item.create_element("link")
                .write_text_content(BytesText::new(&entry.html_url))?;
            item.create_element("enclosure")
                .with_attributes([
                    ("url", enclosure_url.as_str()),
                    ("length", length.as_str()),
                    ("type", TORRENT_MIME_TYPE),
                ])
                .write_empty()?;
            Ok(())
        })?;
    Ok(())
}

/// Write a rendered feed document to disk.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_feed(xml: &str, path: &str) -> io::Result<()> {
    fs::write(path, xml).await?;
    info!(bytes = xml.len(), "Wrote feed file");
    Ok(())
}

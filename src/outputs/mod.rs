//! Output generation for the published feed variants.
//!
//! # Submodules
//!
//! - [`rss`]: Renders normalized releases to RSS 2.0 documents and writes
//!   the four feed variant files
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── github.feed.xml               # stable releases, direct links
//! ├── github.feed.prerelease.xml    # + pre-releases, direct links
//! ├── mirror.feed.xml               # stable releases, mirror links
//! └── mirror.feed.prerelease.xml    # + pre-releases, mirror links
//! ```

pub mod rss;

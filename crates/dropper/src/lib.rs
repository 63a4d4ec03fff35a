// ABOUTME: Main library entry point for dropper, a web page to Markdown archiver.
// ABOUTME: Re-exports the public API: Archiver, ArchiverBuilder, normalize, build, ArchiveError.

//! Dropper - save the readable part of a web page as a Markdown file.
//!
//! A run fetches one URL, extracts its readable content, and assembles a
//! Markdown document with YAML frontmatter. The document is printed, or written
//! under a filesystem-safe name derived from the page title.
//!
//! # Example
//!
//! ```no_run
//! use dropper::{Archiver, ArchiveError, Output, OutputMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ArchiveError> {
//!     let archiver = Archiver::builder().output_mode(OutputMode::File).build()?;
//!     if let Output::Saved(path) = archiver.run("https://example.com/article").await? {
//!         println!("Saved to: {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod archiver;
pub mod document;
pub mod error;
pub mod extract;
pub mod filename;
pub mod formats;
pub mod logging;
pub mod options;
pub mod resource;

pub use crate::archiver::{Archive, Archiver, Output};
pub use crate::document::{build, ArchiveRecord, UNTITLED};
pub use crate::error::{ArchiveError, ErrorCode};
pub use crate::extract::{extract, ContentNode, ExtractedDocument, Metadata, DEFAULT_CHAR_THRESHOLD};
pub use crate::filename::{normalize, normalize_default, DEFAULT_MAX_BYTES};
pub use crate::options::{ArchiverBuilder, Options, OutputMode, DEFAULT_TIMEOUT_SECS};

// ABOUTME: The Archiver runs one page through fetch, extraction, document assembly, and output.
// ABOUTME: Output is either the document text for stdout or a file named from the page title.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::document::ArchiveRecord;
use crate::error::ArchiveError;
use crate::extract::extract;
use crate::filename::normalize;
use crate::options::{ArchiverBuilder, Options, OutputMode};
use crate::resource::fetch;

/// Extension of archived documents.
pub const MARKDOWN_EXT: &str = ".md";

/// A fully assembled document, ready to print or write.
#[derive(Debug, Clone)]
pub struct Archive {
    pub record: ArchiveRecord,
    pub content: String,
}

impl Archive {
    /// The filename for this archive: the title plus the save time in milliseconds.
    pub fn filename(&self, max_bytes: usize) -> Result<String, ArchiveError> {
        normalize(
            self.record.display_title(),
            self.record.date_saved.timestamp_millis(),
            MARKDOWN_EXT,
            max_bytes,
        )
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The document text, to be printed.
    Stdout(String),
    /// The path the document was written to.
    Saved(PathBuf),
}

/// Fetches pages and turns them into archived Markdown documents.
#[derive(Debug, Clone)]
pub struct Archiver {
    opts: Options,
    http_client: reqwest::Client,
}

impl Archiver {
    /// Create an Archiver, building an HTTP client unless one was supplied.
    pub fn new(opts: Options) -> Result<Self, ArchiveError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ArchiveError::fetch(
                        "",
                        "BuildClient",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        Ok(Self { opts, http_client })
    }

    pub fn builder() -> ArchiverBuilder {
        ArchiverBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetch `url` and assemble its archive, stamped with the current time.
    pub async fn archive(&self, url: &str) -> Result<Archive, ArchiveError> {
        let fetched = fetch(&self.http_client, url).await?;
        self.assemble(&fetched.text(), url, &fetched.final_url, Utc::now())
    }

    /// Assemble the archive for already-fetched `html`.
    pub fn archive_html(
        &self,
        html: &str,
        url: &str,
        saved_at: DateTime<Utc>,
    ) -> Result<Archive, ArchiveError> {
        self.assemble(html, url, url, saved_at)
    }

    /// Extract against `base_url`, the address the page was actually served
    /// from, while the record keeps the requested `url`.
    fn assemble(
        &self,
        html: &str,
        url: &str,
        base_url: &str,
        saved_at: DateTime<Utc>,
    ) -> Result<Archive, ArchiveError> {
        let extracted = extract(html, base_url, self.opts.char_threshold)?;
        let record = ArchiveRecord::new(url, &extracted, saved_at);
        let content = record.render();
        Ok(Archive { record, content })
    }

    /// Archive `url` and deliver it according to the configured output mode.
    pub async fn run(&self, url: &str) -> Result<Output, ArchiveError> {
        if url.is_empty() {
            return Err(ArchiveError::missing_input("Archive"));
        }

        let archive = self.archive(url).await?;
        self.deliver(&archive)
    }

    /// Hand an assembled archive to stdout or the filesystem.
    pub fn deliver(&self, archive: &Archive) -> Result<Output, ArchiveError> {
        match self.opts.output_mode {
            OutputMode::Stdout => Ok(Output::Stdout(archive.content.clone())),
            OutputMode::File => {
                let name = archive.filename(self.opts.max_filename_bytes)?;
                let path = self.opts.output_dir.join(name);
                write_new_file(&path, &archive.content)
                    .map_err(|e| ArchiveError::write(&archive.record.url, "Write", Some(e.into())))?;
                tracing::info!(path = %path.display(), "saved archive");
                Ok(Output::Saved(path))
            }
        }
    }
}

/// Write `content` to `path`, refusing to replace an existing file.
fn write_new_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content.as_bytes())
}

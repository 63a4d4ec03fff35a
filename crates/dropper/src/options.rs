// ABOUTME: Configuration for an archive run: Options plus the fluent ArchiverBuilder.
// ABOUTME: Covers HTTP settings, the extraction threshold, and where and how output is written.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::archiver::Archiver;
use crate::error::ArchiveError;
use crate::extract::DEFAULT_CHAR_THRESHOLD;
use crate::filename::DEFAULT_MAX_BYTES;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the assembled document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    File,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputMode::Stdout => "stdout",
            OutputMode::File => "file",
        };
        write!(f, "{}", s)
    }
}

/// Configuration options for the Archiver.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub char_threshold: usize,
    pub max_filename_bytes: usize,
    pub output_mode: OutputMode,
    pub output_dir: PathBuf,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("dropper/", env!("CARGO_PKG_VERSION")).to_string(),
            char_threshold: DEFAULT_CHAR_THRESHOLD,
            max_filename_bytes: DEFAULT_MAX_BYTES,
            output_mode: OutputMode::Stdout,
            output_dir: PathBuf::from("."),
            http_client: None,
        }
    }
}

/// Builder for constructing Archiver instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ArchiverBuilder {
    opts: Options,
}

impl ArchiverBuilder {
    /// Create a new ArchiverBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the minimum character count for readable content.
    pub fn char_threshold(mut self, threshold: usize) -> Self {
        self.opts.char_threshold = threshold;
        self
    }

    /// Set the UTF-8 byte budget for generated filenames.
    pub fn max_filename_bytes(mut self, max_bytes: usize) -> Self {
        self.opts.max_filename_bytes = max_bytes;
        self
    }

    /// Choose between printing and writing a file.
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.opts.output_mode = mode;
        self
    }

    /// Set the directory files are written to in file mode.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.opts.output_dir = dir.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Archiver with the configured options.
    pub fn build(self) -> Result<Archiver, ArchiveError> {
        Archiver::new(self.opts)
    }
}

impl Default for ArchiverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

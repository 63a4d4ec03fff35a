// ABOUTME: Error types for dropper including the ErrorCode enum and ArchiveError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the categories of archive failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingInput,
    InvalidUrl,
    FetchFailure,
    InvalidArgument,
    ExtractionFailure,
    Write,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingInput => "missing input",
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::FetchFailure => "fetch failed",
            ErrorCode::InvalidArgument => "invalid argument",
            ErrorCode::ExtractionFailure => "extraction failed",
            ErrorCode::Write => "write failed",
        };
        write!(f, "{}", s)
    }
}

/// The error type for every fallible step of an archive run.
#[derive(Debug, thiserror::Error)]
pub struct ArchiveError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    /// HTTP status of the response, for fetch failures that got one.
    pub status: Option<u16>,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropper: {}", self.op)?;
        if !self.url.is_empty() {
            write!(f, " {}", self.url)?;
        }
        write!(f, ": {}", self.code)?;
        if let Some(status) = self.status {
            write!(f, ": HTTP status {}", status)?;
        }
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ArchiveError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            status: None,
            source,
        }
    }

    /// Create a MissingInput error.
    pub fn missing_input(op: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingInput,
            String::new(),
            op,
            Some(anyhow::anyhow!("URL is required")),
        )
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a FetchFailure error for a transport-level problem.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::FetchFailure, url, op, source)
    }

    /// Create a FetchFailure error carrying the response status.
    pub fn status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorCode::FetchFailure, url, op, None)
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(op: impl Into<String>, msg: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidArgument,
            String::new(),
            op,
            Some(anyhow::anyhow!("{}", msg)),
        )
    }

    /// Create an ExtractionFailure error.
    pub fn extract(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::ExtractionFailure, url, op, source)
    }

    /// Create a Write error.
    pub fn write(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Write, url, op, source)
    }

    /// Returns true if this is a MissingInput error.
    pub fn is_missing_input(&self) -> bool {
        self.code == ErrorCode::MissingInput
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a FetchFailure error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::FetchFailure
    }

    /// Returns true if this is an InvalidArgument error.
    pub fn is_invalid_argument(&self) -> bool {
        self.code == ErrorCode::InvalidArgument
    }

    /// Returns true if this is an ExtractionFailure error.
    pub fn is_extract(&self) -> bool {
        self.code == ErrorCode::ExtractionFailure
    }

    /// Returns true if this is a Write error.
    pub fn is_write(&self) -> bool {
        self.code == ErrorCode::Write
    }
}

//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Exit codes mirror the statuses of the tools a shell
//! bootstrap would have invoked (`curl -f`, `tar`, `unzip`, `execve`).

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for any failure that carries no typed status.
pub const EXIT_FAILURE: i32 = 1;

// ── Fetch errors ──────────────────────────────────────────────────────────────

/// Errors raised while retrieving a package. URLs are stored redacted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("malformed URL: {url}")]
    InvalidUrl { url: String },

    #[error("unsupported protocol: {url}")]
    UnsupportedScheme { url: String },

    #[error("could not resolve host for {url}: {message}")]
    Dns { url: String, message: String },

    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("too many redirects fetching {url}")]
    TooManyRedirects { url: String },

    #[error("transfer from {url} failed: {message}")]
    Transfer { url: String, message: String },

    #[error("cannot read {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Exit status `curl -fs` reports for the same failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HttpStatus { .. } => 22,
            Self::InvalidUrl { .. } => 3,
            Self::UnsupportedScheme { .. } => 1,
            Self::Dns { .. } => 6,
            Self::Connect { .. } => 7,
            Self::TooManyRedirects { .. } => 47,
            Self::Transfer { .. } => 56,
            Self::SourceUnreadable { .. } => 37,
            Self::Write { .. } => 23,
        }
    }
}

// ── Extract errors ────────────────────────────────────────────────────────────

/// Errors raised while unpacking a downloaded package.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot extract {} into {}: {source}", archive.display(), dest.display())]
    Tar {
        archive: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot find zipfile {}", archive.display())]
    ZipMissing { archive: PathBuf },

    #[error("corrupt zipfile {}: {message}", archive.display())]
    ZipCorrupt { archive: PathBuf, message: String },

    #[error("cannot write {}: {source}", path.display())]
    ZipWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Exit status `tar` / `unzip` report for the same failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Tar { .. } => 2,
            Self::ZipMissing { .. } => 9,
            Self::ZipCorrupt { .. } => 3,
            Self::ZipWrite { .. } => 50,
        }
    }
}

// ── Launch errors ─────────────────────────────────────────────────────────────

/// The agent executable could not replace the current process.
#[derive(Debug, Error)]
#[error("cannot launch {}: {source}", path.display())]
pub struct LaunchError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl LaunchError {
    /// Shell convention: 127 when the target is missing, 126 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.source.kind() == std::io::ErrorKind::NotFound {
            127
        } else {
            126
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No {0} URL configured. Pass --{1} or set {2}.")]
    MissingUrl(&'static str, &'static str, &'static str),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidPath {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    /// `EX_CONFIG` from sysexits.h.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        78
    }
}

// ── Exit status selection ─────────────────────────────────────────────────────

/// Pick the process exit status for an error chain.
///
/// The first typed error found in the chain wins; anything else maps to
/// [`EXIT_FAILURE`].
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    classify(err).map_or(EXIT_FAILURE, |(code, _)| code)
}

/// Short machine-readable label for an error chain, used in JSON output.
#[must_use]
pub fn error_label(err: &anyhow::Error) -> &'static str {
    classify(err).map_or("error", |(_, label)| label)
}

fn classify(err: &anyhow::Error) -> Option<(i32, &'static str)> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<FetchError>() {
            Some((e.exit_code(), "fetch_failed"))
        } else if let Some(e) = cause.downcast_ref::<ExtractError>() {
            Some((e.exit_code(), "extract_failed"))
        } else if let Some(e) = cause.downcast_ref::<LaunchError>() {
            Some((e.exit_code(), "launch_failed"))
        } else {
            cause
                .downcast_ref::<ConfigError>()
                .map(|e| (e.exit_code(), "config_invalid"))
        }
    })
}

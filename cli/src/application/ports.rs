//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;

use anyhow::Result;

use crate::domain::BootstrapConfig;

// ── Transport Port ────────────────────────────────────────────────────────────

/// Retrieves a package to a local file.
pub trait ArtifactFetcher {
    /// Download `url` to `dest`, replacing any existing file, and return the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::FetchError`] if the transfer fails or the
    /// destination cannot be written. No retry is attempted.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

// ── Archive Port ──────────────────────────────────────────────────────────────

/// Unpacks downloaded packages.
pub trait ArchiveExtractor {
    /// Unpack a gzip-tar into `dest`.
    ///
    /// Entries end up owned by the invoking user; UID/GID recorded in the
    /// archive are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::ExtractError`] if the archive cannot be
    /// decoded or written.
    fn extract_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()>;

    /// Unpack a zip into `dest`, overwriting files that already exist, and
    /// return the number of files written.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::ExtractError`] if the archive is missing,
    /// corrupt, or cannot be written.
    fn extract_zip(&self, archive: &Path, dest: &Path) -> Result<usize>;
}

// ── Hashing Port ──────────────────────────────────────────────────────────────

/// Computes file digests for reporting.
pub trait FileHasher {
    /// Hex-encoded SHA-256 of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

// ── Process Port ──────────────────────────────────────────────────────────────

/// Replaces the current process with another executable.
pub trait ProcessLauncher {
    /// Run `executable` with `argv[0]` set to its path and no further
    /// arguments, in place of the current process.
    ///
    /// Only returns on failure, mirroring `CommandExt::exec`.
    fn exec(&self, executable: &Path) -> std::io::Error;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts where the bootstrap configuration file lives.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::ConfigError`] if an explicitly requested
    /// file is missing or cannot be parsed.
    fn load(&self) -> Result<BootstrapConfig>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

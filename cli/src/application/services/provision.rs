//! Application service: fetch both packages, unpack them, launch Ranger.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Every step either
//! succeeds and advances or ends the run; nothing is retried or cleaned up.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{
    ArchiveExtractor, ArtifactFetcher, FileHasher, ProcessLauncher, ProgressReporter,
};
use crate::domain::{FetchedArtifact, LaunchError, PackageKind, ProvisionPlan, redact_url};

/// What an install run put on disk.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub credentials: FetchedArtifact,
    pub ranger: FetchedArtifact,
    pub install_root: PathBuf,
    pub certs_dir: PathBuf,
    pub executable: PathBuf,
    /// Files written from the credentials zip.
    pub credential_files: usize,
}

/// Download both packages and unpack them, without launching Ranger.
///
/// The credentials package is fetched first, then the Ranger package; both
/// must be on disk before either is unpacked. The Ranger tarball is unpacked
/// before the credentials zip, since the latter lands inside the tree the
/// former creates.
///
/// # Errors
///
/// Returns the first failure. Earlier downloads are left on disk.
pub fn install(
    plan: &ProvisionPlan,
    fetcher: &impl ArtifactFetcher,
    extractor: &impl ArchiveExtractor,
    hasher: &(impl FileHasher + ?Sized),
    reporter: &impl ProgressReporter,
) -> Result<InstallReport> {
    let layout = &plan.layout;

    let credentials = fetch_package(
        PackageKind::Credentials,
        &plan.sources.credentials_url,
        &layout.credentials_archive,
        fetcher,
        hasher,
        reporter,
    )?;
    let ranger = fetch_package(
        PackageKind::Ranger,
        &plan.sources.ranger_url,
        &layout.ranger_archive,
        fetcher,
        hasher,
        reporter,
    )?;

    reporter.step(&format!(
        "Unpacking Ranger package into {}",
        layout.install_dir.display()
    ));
    extractor
        .extract_tar_gz(&layout.ranger_archive, &layout.install_dir)
        .context("unpacking Ranger package")?;
    reporter.success(&format!("Unpacked {}", layout.install_root.display()));

    reporter.step(&format!(
        "Installing device credentials into {}",
        layout.certs_dir.display()
    ));
    let credential_files = extractor
        .extract_zip(&layout.credentials_archive, &layout.certs_dir)
        .context("installing device credentials")?;
    reporter.success(&format!("Installed {credential_files} credential file(s)"));

    Ok(InstallReport {
        credentials,
        ranger,
        install_root: layout.install_root.clone(),
        certs_dir: layout.certs_dir.clone(),
        executable: layout.executable.clone(),
        credential_files,
    })
}

/// Install both packages, then replace this process with Ranger.
///
/// Never returns `Ok`: on success the process image is gone. No code after
/// the launch runs and temporary archives are kept.
///
/// # Errors
///
/// Returns the first install failure, or a [`LaunchError`] carrying the OS
/// error if the executable is missing or not runnable.
pub fn provision(
    plan: &ProvisionPlan,
    fetcher: &impl ArtifactFetcher,
    extractor: &impl ArchiveExtractor,
    hasher: &(impl FileHasher + ?Sized),
    launcher: &impl ProcessLauncher,
    reporter: &impl ProgressReporter,
) -> Result<Infallible> {
    let report = install(plan, fetcher, extractor, hasher, reporter)?;

    reporter.step(&format!("Launching {}", report.executable.display()));
    let source = launcher.exec(&report.executable);
    Err(LaunchError {
        path: report.executable,
        source,
    }
    .into())
}

fn fetch_package(
    kind: PackageKind,
    url: &str,
    dest: &Path,
    fetcher: &impl ArtifactFetcher,
    hasher: &(impl FileHasher + ?Sized),
    reporter: &impl ProgressReporter,
) -> Result<FetchedArtifact> {
    let source = redact_url(url);
    reporter.step(&format!("Downloading {} from {source}", kind.label()));

    let bytes = fetcher
        .fetch(url, dest)
        .with_context(|| format!("downloading {}", kind.label()))?;
    if bytes == 0 {
        reporter.warn(&format!("{} is empty", kind.label()));
    }

    let sha256 = match hasher.sha256_file(dest) {
        Ok(digest) => Some(digest),
        Err(e) => {
            reporter.warn(&format!("cannot hash {}: {e}", dest.display()));
            None
        }
    };
    reporter.success(&format!("Downloaded {} ({bytes} bytes)", kind.label()));

    Ok(FetchedArtifact {
        kind,
        source,
        path: dest.to_path_buf(),
        bytes,
        sha256,
    })
}

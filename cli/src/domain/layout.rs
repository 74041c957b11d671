//! Filesystem layout of a Ranger installation.
//!
//! Pure path derivation. Nothing here touches the disk.

use std::path::{Path, PathBuf};

use serde::Serialize;

pub const DEFAULT_DOWNLOAD_DIR: &str = "/tmp";
pub const DEFAULT_INSTALL_DIR: &str = "/opt";
pub const DEFAULT_RANGER_HOME: &str = "nightswatch-ranger";
pub const DEFAULT_CERTS_SUBDIR: &str = "certs/p1";
pub const DEFAULT_EXECUTABLE: &str = "ranger";

pub const CREDENTIALS_ARCHIVE_NAME: &str = "credentials.zip";
pub const RANGER_ARCHIVE_NAME: &str = "nightswatch-ranger.tar.gz";

/// Every path a bootstrap run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallLayout {
    /// Download target of the credentials zip.
    pub credentials_archive: PathBuf,
    /// Download target of the Ranger tarball.
    pub ranger_archive: PathBuf,
    /// Directory the tarball is unpacked into. The tarball carries the
    /// top-level `ranger_home` directory itself.
    pub install_dir: PathBuf,
    /// `<install_dir>/<ranger_home>`.
    pub install_root: PathBuf,
    /// `<install_root>/<certs_subdir>`, target of the credentials zip.
    pub certs_dir: PathBuf,
    /// `<install_root>/<executable>`, the process that replaces us.
    pub executable: PathBuf,
}

impl InstallLayout {
    /// Derive the layout. Relative components must already be validated.
    #[must_use]
    pub fn new(
        download_dir: &Path,
        install_dir: &Path,
        ranger_home: &Path,
        certs_subdir: &Path,
        executable: &Path,
    ) -> Self {
        let install_root = install_dir.join(ranger_home);
        Self {
            credentials_archive: download_dir.join(CREDENTIALS_ARCHIVE_NAME),
            ranger_archive: download_dir.join(RANGER_ARCHIVE_NAME),
            install_dir: install_dir.to_path_buf(),
            certs_dir: install_root.join(certs_subdir),
            executable: install_root.join(executable),
            install_root,
        }
    }
}

impl Default for InstallLayout {
    fn default() -> Self {
        Self::new(
            Path::new(DEFAULT_DOWNLOAD_DIR),
            Path::new(DEFAULT_INSTALL_DIR),
            Path::new(DEFAULT_RANGER_HOME),
            Path::new(DEFAULT_CERTS_SUBDIR),
            Path::new(DEFAULT_EXECUTABLE),
        )
    }
}

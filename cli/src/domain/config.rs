//! Domain types and validators for bootstrap configuration.
//!
//! Pure functions only; no I/O, no filesystem access.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::layout::{
    DEFAULT_CERTS_SUBDIR, DEFAULT_DOWNLOAD_DIR, DEFAULT_EXECUTABLE, DEFAULT_INSTALL_DIR,
    DEFAULT_RANGER_HOME, InstallLayout,
};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration file.
///
/// ```yaml
/// credentials_url: https://bucket.s3.amazonaws.com/device-1/credentials.zip?...
/// ranger_url: https://bucket.s3.amazonaws.com/nightswatch-ranger.tar.gz?...
/// paths:
///   install_dir: /opt
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Credentials package (zip) locator.
    pub credentials_url: Option<String>,
    /// Ranger package (gzip-tar) locator.
    pub ranger_url: Option<String>,
    /// Filesystem locations.
    pub paths: PathsConfig,
}

/// Filesystem locations, all with device-image defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub download_dir: PathBuf,
    pub install_dir: PathBuf,
    /// Top-level directory inside the Ranger tarball.
    pub ranger_home: PathBuf,
    /// Credentials target, relative to the Ranger home.
    pub certs_subdir: PathBuf,
    /// Agent binary, relative to the Ranger home.
    pub executable: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            ranger_home: PathBuf::from(DEFAULT_RANGER_HOME),
            certs_subdir: PathBuf::from(DEFAULT_CERTS_SUBDIR),
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
        }
    }
}

/// Locators supplied on the command line or through the environment.
/// They take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub credentials_url: Option<String>,
    pub ranger_url: Option<String>,
}

/// Where the two packages come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSources {
    pub credentials_url: String,
    pub ranger_url: String,
}

/// Fully resolved input of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPlan {
    pub sources: PackageSources,
    pub layout: InstallLayout,
}

// ── Resolution ───────────────────────────────────────────────────────────────

impl BootstrapConfig {
    /// Merge overrides and validate into a runnable plan.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is missing or blank, or a path field is
    /// not usable.
    pub fn resolve(self, overrides: SourceOverrides) -> Result<ProvisionPlan, ConfigError> {
        let credentials_url = require_url(
            overrides.credentials_url.or(self.credentials_url),
            ConfigError::MissingUrl(
                "credentials package",
                "credentials-url",
                "CREDENTIALS_PKG_URL",
            ),
        )?;
        let ranger_url = require_url(
            overrides.ranger_url.or(self.ranger_url),
            ConfigError::MissingUrl("Ranger package", "ranger-url", "NW_RANGER_PKG_URL"),
        )?;
        let layout = self.paths.layout()?;

        Ok(ProvisionPlan {
            sources: PackageSources {
                credentials_url,
                ranger_url,
            },
            layout,
        })
    }
}

impl PathsConfig {
    /// Validate every field and derive the install layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory is empty or a relative field escapes
    /// its parent.
    pub fn layout(&self) -> Result<InstallLayout, ConfigError> {
        validate_dir("paths.download_dir", &self.download_dir)?;
        validate_dir("paths.install_dir", &self.install_dir)?;
        validate_relative("paths.ranger_home", &self.ranger_home)?;
        validate_relative("paths.certs_subdir", &self.certs_subdir)?;
        validate_relative("paths.executable", &self.executable)?;
        Ok(InstallLayout::new(
            &self.download_dir,
            &self.install_dir,
            &self.ranger_home,
            &self.certs_subdir,
            &self.executable,
        ))
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

fn require_url(value: Option<String>, missing: ConfigError) -> Result<String, ConfigError> {
    match value {
        Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        _ => Err(missing),
    }
}

fn validate_dir(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath {
            field,
            value: String::new(),
            reason: "must not be empty",
        });
    }
    Ok(())
}

/// Validates a path that must stay beneath the directory it is joined to.
///
/// # Errors
///
/// Returns an error if the path is empty, absolute, or contains `..`.
pub fn validate_relative(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidPath {
        field,
        value: path.display().to_string(),
        reason,
    };
    if path.as_os_str().is_empty() {
        return Err(invalid("must not be empty"));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be a relative path"));
            }
        }
    }
    if !path.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid("must name a file or directory"));
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────

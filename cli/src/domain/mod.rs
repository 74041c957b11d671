//! Domain layer: pure types, path derivation, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifact;
pub mod config;
pub mod error;
pub mod layout;

pub use artifact::{FetchedArtifact, PackageKind, hex_encode, redact_url};
pub use config::{BootstrapConfig, PackageSources, PathsConfig, ProvisionPlan, SourceOverrides};
pub use error::{ConfigError, ExtractError, FetchError, LaunchError, exit_code};
pub use layout::InstallLayout;

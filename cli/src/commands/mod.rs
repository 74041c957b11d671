//! Command implementations

pub mod config;
pub mod install;
pub mod provision;
pub mod version;

use clap::Args;

use crate::domain::SourceOverrides;

/// Package locators. Also read from the environment a device image's
/// user-data sets.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Credentials package (zip) URL
    #[arg(long, global = true, env = "CREDENTIALS_PKG_URL", value_name = "URL")]
    pub credentials_url: Option<String>,

    /// Ranger package (tar.gz) URL
    #[arg(long, global = true, env = "NW_RANGER_PKG_URL", value_name = "URL")]
    pub ranger_url: Option<String>,
}

impl SourceArgs {
    /// Convert into domain overrides.
    #[must_use]
    pub fn into_overrides(self) -> SourceOverrides {
        SourceOverrides {
            credentials_url: self.credentials_url,
            ranger_url: self.ranger_url,
        }
    }
}

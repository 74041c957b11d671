//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::application::ports::ConfigStore;
use crate::domain::{BootstrapConfig, ConfigError};

/// Environment variable naming the config file (also `--config`).
pub const CONFIG_ENV: &str = "RANGER_BOOTSTRAP_CONFIG";

/// Config file read when none is named explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/nightswatch/ranger-bootstrap.yaml";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    /// An explicit path must exist; without one the default path is optional.
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// The file this store reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.explicit
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<BootstrapConfig> {
        let path = self.path();
        if !path.exists() {
            if self.explicit.is_some() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
            }
            return Ok(BootstrapConfig::default());
        }
        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| parse_err(e.to_string()))?;
        Ok(serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string()))?)
    }
}

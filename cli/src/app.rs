//! Application context: unified state passed to every command handler.
//!
//! Built once from the top-level flags in `Cli::run()`; commands read output
//! settings and resolve their configuration through it.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::{BootstrapConfig, ProvisionPlan, SourceOverrides};
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Explicit config file (`--config` / `RANGER_BOOTSTRAP_CONFIG`).
    pub config: Option<PathBuf>,
    /// Package locators from flags or environment.
    pub sources: SourceOverrides,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context. Progress lines are suppressed in JSON mode.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
    /// Locators that override the config file.
    pub sources: SourceOverrides,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore::new(flags.config),
            sources: flags.sources,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Load the config file without requiring package URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load_config(&self) -> Result<BootstrapConfig> {
        self.config_store.load()
    }

    /// Load the config file and merge flag/env locators into a runnable plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is unreadable, a URL is missing, or a
    /// path is invalid.
    pub fn load_plan(&self) -> Result<ProvisionPlan> {
        let plan = self
            .load_config()?
            .resolve(self.sources.clone())
            .context("invalid bootstrap configuration")?;
        Ok(plan)
    }
}

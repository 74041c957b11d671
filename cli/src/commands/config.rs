//! Config command: show the resolved configuration.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{InstallLayout, redact_url};
use crate::output::json;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show package sources and install paths after merging flags,
    /// environment and config file
    Show,
}

#[derive(Serialize)]
struct ResolvedConfig {
    config_file: String,
    credentials_url: Option<String>,
    ranger_url: Option<String>,
    layout: InstallLayout,
}

/// Run a config subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or its paths are
/// invalid.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(app),
    }
}

fn show(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let sources = app.sources.clone();
    let resolved = ResolvedConfig {
        config_file: app.config_store.path().display().to_string(),
        credentials_url: sources
            .credentials_url
            .or(cfg.credentials_url)
            .map(|u| redact_url(&u)),
        ranger_url: sources.ranger_url.or(cfg.ranger_url).map(|u| redact_url(&u)),
        layout: cfg.paths.layout()?,
    };

    if app.is_json() {
        println!("{}", json::to_pretty(&resolved)?);
        return Ok(());
    }

    let ctx = &app.output;
    let unset = "(not set)".to_string();
    ctx.header("Configuration");
    ctx.kv("config file    ", &resolved.config_file);
    ctx.kv("credentials url", resolved.credentials_url.as_ref().unwrap_or(&unset));
    ctx.kv("ranger url     ", resolved.ranger_url.as_ref().unwrap_or(&unset));
    let layout = &resolved.layout;
    for (key, path) in [
        ("credentials zip", &layout.credentials_archive),
        ("ranger tarball ", &layout.ranger_archive),
        ("install dir    ", &layout.install_dir),
        ("install root   ", &layout.install_root),
        ("certs dir      ", &layout.certs_dir),
        ("executable     ", &layout.executable),
    ] {
        ctx.kv(key, &path.display().to_string());
    }
    Ok(())
}

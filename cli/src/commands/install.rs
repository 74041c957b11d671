//! Install command: provision without launching.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::provision::{InstallReport, install};
use crate::infra::archive::NativeExtractor;
use crate::infra::fetch::UreqFetcher;
use crate::infra::fs::LocalFs;
use crate::output::{OutputContext, TerminalReporter, json};

/// Run the install command.
///
/// # Errors
///
/// Returns the first failing download or extraction.
pub fn run(app: &AppContext) -> Result<()> {
    let plan = app.load_plan()?;
    let reporter = TerminalReporter::new(&app.output);
    let fetcher = UreqFetcher::new(app.output.show_progress());

    let report = install(&plan, &fetcher, &NativeExtractor, &LocalFs, &reporter)?;

    if app.is_json() {
        println!("{}", json::to_pretty(&report)?);
    } else {
        print_report(&app.output, &report);
    }
    Ok(())
}

fn print_report(ctx: &OutputContext, report: &InstallReport) {
    ctx.success("Ranger installed");
    ctx.kv("install root", &report.install_root.display().to_string());
    ctx.kv("credentials ", &report.certs_dir.display().to_string());
    ctx.kv("executable  ", &report.executable.display().to_string());
    for artifact in [&report.credentials, &report.ranger] {
        if let Some(sha256) = &artifact.sha256 {
            ctx.kv("sha256      ", &format!("{sha256}  {}", artifact.path.display()));
        }
    }
}

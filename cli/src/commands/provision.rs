//! Provision command: the default bootstrap run.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::provision::provision;
use crate::infra::archive::NativeExtractor;
use crate::infra::fetch::UreqFetcher;
use crate::infra::fs::LocalFs;
use crate::infra::launcher::ExecLauncher;
use crate::output::TerminalReporter;

/// Run the provision command.
///
/// # Errors
///
/// Returns the first failing step. Never returns `Ok`: on success Ranger has
/// replaced this process.
pub fn run(app: &AppContext) -> Result<()> {
    let plan = app.load_plan()?;
    let reporter = TerminalReporter::new(&app.output);
    let fetcher = UreqFetcher::new(app.output.show_progress());

    match provision(
        &plan,
        &fetcher,
        &NativeExtractor,
        &LocalFs,
        &ExecLauncher,
        &reporter,
    )? {}
}

//! Process infrastructure: implements `ProcessLauncher`.

use std::io::Write as _;
use std::path::Path;
use std::process::Command;

use crate::application::ports::ProcessLauncher;

/// Replaces the current process image with the target executable.
///
/// On unix this is `execv`: same PID, inherited stdio and environment.
/// Elsewhere the successor is spawned and this process exits with its
/// status as soon as it finishes.
pub struct ExecLauncher;

impl ProcessLauncher for ExecLauncher {
    fn exec(&self, executable: &Path) -> std::io::Error {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        replace_process(executable)
    }
}

#[cfg(unix)]
fn replace_process(executable: &Path) -> std::io::Error {
    use std::os::unix::process::CommandExt;
    Command::new(executable).arg0(executable).exec()
}

#[cfg(not(unix))]
fn replace_process(executable: &Path) -> std::io::Error {
    match Command::new(executable).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}

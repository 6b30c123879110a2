use std::path::Path;
use std::process::{Command, Stdio};

/// Hand `path` to the desktop's default viewer. Failure is logged, never fatal.
///
/// Returns `true` when the launcher started and exited successfully.
pub fn open_in_viewer(path: &Path) -> bool {
    let mut cmd = launcher();
    cmd.arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match cmd.status() {
        Ok(status) if status.success() => {
            tracing::debug!(path = %path.display(), "opened viewer");
            true
        }
        Ok(status) => {
            tracing::warn!(path = %path.display(), %status, "viewer exited unsuccessfully");
            false
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not launch viewer");
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn launcher() -> Command {
    Command::new("open")
}

#[cfg(windows)]
fn launcher() -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn launcher() -> Command {
    Command::new("xdg-open")
}

//! Subprocess helpers for the command-line platform backends.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{PlatformError, Result};

/// Captured result of a finished tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Stdout of a successful run, or `CommandFailed` naming `command`.
    pub fn into_stdout(self, command: &str) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(PlatformError::CommandFailed {
                command: command.to_string(),
                status: self.status,
                stderr: self.stderr.trim().to_string(),
            }
            .into())
        }
    }
}

/// Longest a single tool invocation may take before it is killed.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `program` with `args` to completion and capture its output.
///
/// A non-zero exit is not an error here; failing to spawn or exceeding
/// [`TOOL_TIMEOUT`] is.
pub async fn run(program: &str, args: &[&str]) -> Result<ToolOutput> {
    run_with_timeout(program, args, TOOL_TIMEOUT).await
}

/// [`run`] with an explicit deadline. The child is killed when it expires.
pub async fn run_with_timeout(
    program: &str,
    args: &[&str],
    limit: Duration,
) -> Result<ToolOutput> {
    debug!(program, ?args, "running tool");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(limit, child).await {
        Ok(result) => result.map_err(PlatformError::from)?,
        Err(_) => {
            let command = command_line(program, args);
            warn!(%command, ?limit, "tool timed out");
            return Err(PlatformError::Timeout { command }.into());
        }
    };

    Ok(ToolOutput {
        success: output.status.success(),
        status: output.status.to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run a tool and return its stdout, failing on a non-zero exit.
pub async fn run_checked(program: &str, args: &[&str]) -> Result<String> {
    run(program, args)
        .await?
        .into_stdout(&command_line(program, args))
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `tool` resolves on `PATH`.
pub async fn is_installed(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn output(success: bool) -> ToolOutput {
        ToolOutput {
            success,
            status: if success { "exit status: 0" } else { "exit status: 1" }.to_string(),
            stdout: "Powered: yes\n".to_string(),
            stderr: "  org.bluez.Error.Failed \n".to_string(),
        }
    }

    #[test]
    fn successful_output_yields_stdout() {
        assert_eq!(output(true).into_stdout("bluetoothctl show").unwrap(), "Powered: yes\n");
    }

    #[test]
    fn failed_output_becomes_command_failed() {
        let err = output(false).into_stdout("bluetoothctl show").unwrap_err();
        match err {
            Error::Platform(PlatformError::CommandFailed {
                command, stderr, ..
            }) => {
                assert_eq!(command, "bluetoothctl show");
                assert_eq!(stderr, "org.bluez.Error.Failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let err = run("wakeplay-no-such-tool-xyz", &[]).await.unwrap_err();
        assert!(matches!(err, Error::Platform(PlatformError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_tool_is_killed_at_deadline() {
        let start = std::time::Instant::now();
        let err = run_with_timeout(
            "sh",
            &["-c", "echo 'Waiting to connect to bluetoothd...'; sleep 30"],
            Duration::from_millis(300),
        )
        .await
        .unwrap_err();

        assert!(start.elapsed() < Duration::from_secs(5));
        match err {
            Error::Platform(PlatformError::Timeout { command }) => {
                assert!(command.starts_with("sh -c"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn quick_tool_finishes_within_deadline() {
        let out = run_with_timeout("sh", &["-c", "echo ok"], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "ok");
    }
}

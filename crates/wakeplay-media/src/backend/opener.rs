//! Opening URIs with the desktop's registered handler.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use wakeplay_core::{PlatformError, ProcessLauncher, Result};

/// Hands URIs to `xdg-open`, `open` or `cmd /c start` and does not wait.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl SystemOpener {
    pub fn new() -> Self {
        Self
    }
}

/// Program and arguments that open `uri` on this OS.
pub(crate) fn open_command(uri: &str) -> Option<(&'static str, Vec<String>)> {
    if cfg!(target_os = "linux") {
        Some(("xdg-open", vec![uri.to_string()]))
    } else if cfg!(target_os = "macos") {
        Some(("open", vec![uri.to_string()]))
    } else if cfg!(target_os = "windows") {
        // The empty argument is the window title `start` expects first
        Some((
            "cmd",
            vec!["/c".to_string(), "start".to_string(), String::new(), uri.to_string()],
        ))
    } else {
        None
    }
}

impl ProcessLauncher for SystemOpener {
    fn spawn_uri(&self, uri: &str) -> Result<()> {
        let (program, args) = open_command(uri)
            .ok_or_else(|| PlatformError::Unsupported("opening URIs on this OS".to_string()))?;

        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(PlatformError::from)?;

        // Dropping the handle detaches; the runtime reaps it on exit
        debug!(program, pid = ?child.id(), "spawned URI handler");
        Ok(())
    }
}

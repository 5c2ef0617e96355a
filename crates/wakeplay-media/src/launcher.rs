//! Launching the media application through its URI scheme.

use tracing::{info, warn};

use wakeplay_core::ProcessLauncher;

/// Scheme opened when no target URI is given.
pub const DEFAULT_SCHEME: &str = "spotify:";

/// Fire-and-forget launcher for the target application.
pub struct AppLauncher<'a> {
    launcher: &'a dyn ProcessLauncher,
    scheme: String,
}

impl<'a> AppLauncher<'a> {
    pub fn new(launcher: &'a dyn ProcessLauncher) -> Self {
        Self {
            launcher,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Hand `uri` (or the bare scheme) to the OS. Spawn failures are only logged.
    pub fn launch(&self, uri: Option<&str>) {
        let target = uri.unwrap_or(&self.scheme);
        match self.launcher.spawn_uri(target) {
            Ok(()) => info!("Launched {}", target),
            Err(e) => warn!("Failed to launch {}: {}", target, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use wakeplay_core::{Error, MockProcessLauncher};

    #[test]
    fn launches_given_uri() {
        let mut launcher = MockProcessLauncher::new();
        launcher
            .expect_spawn_uri()
            .with(eq("spotify:playlist:25NRSu3YOREVhyBkXQrGeE"))
            .times(1)
            .returning(|_| Ok(()));

        AppLauncher::new(&launcher).launch(Some("spotify:playlist:25NRSu3YOREVhyBkXQrGeE"));
    }

    #[test]
    fn bare_scheme_when_no_uri() {
        let mut launcher = MockProcessLauncher::new();
        launcher
            .expect_spawn_uri()
            .with(eq("vlc:"))
            .times(1)
            .returning(|_| Ok(()));

        AppLauncher::new(&launcher).with_scheme("vlc:").launch(None);
    }

    #[test]
    fn spawn_failure_is_not_propagated() {
        let mut launcher = MockProcessLauncher::new();
        launcher
            .expect_spawn_uri()
            .returning(|_| Err(Error::backend("xdg-open missing")));

        AppLauncher::new(&launcher).launch(None);
    }
}

//! Orchestrator builder for configuration.

use std::time::Duration;

use wakeplay_media::TierTimings;

use crate::orchestrator::Orchestrator;
use crate::platform::Platform;
use crate::settings::{AudioSettings, RunSettings};

/// Builder for configuring an `Orchestrator`.
pub struct OrchestratorBuilder {
    platform: Platform,
    settings: RunSettings,
}

impl OrchestratorBuilder {
    /// Create new builder with default settings.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            settings: RunSettings::default(),
        }
    }

    /// Replace all settings at once.
    pub fn settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Substring of the speaker's display name.
    pub fn device_name(mut self, name: impl Into<String>) -> Self {
        self.settings.device_name = name.into();
        self
    }

    /// Hardware address tried when no name matches.
    pub fn device_address(mut self, address: impl Into<String>) -> Self {
        self.settings.device_address = Some(address.into());
        self
    }

    pub fn nudge_wait(mut self, wait: Duration) -> Self {
        self.settings.nudge_wait = wait;
        self
    }

    /// Connection wait deadline and poll cadence.
    pub fn connect_timing(mut self, timeout: Duration, poll: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self.settings.connect_poll = poll;
        self
    }

    /// Substring of the media session owner, and the scheme launched with no URI.
    pub fn application(mut self, app_match: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.settings.app_match = app_match.into();
        self.settings.scheme = scheme.into();
        self
    }

    pub fn primary_uri(mut self, uri: impl Into<String>) -> Self {
        self.settings.targets.primary = Some(uri.into());
        self
    }

    pub fn secondary_uri(mut self, uri: impl Into<String>) -> Self {
        self.settings.targets.secondary = Some(uri.into());
        self
    }

    pub fn timings(mut self, timings: TierTimings) -> Self {
        self.settings.timings = timings;
        self
    }

    pub fn audio(mut self, audio: AudioSettings) -> Self {
        self.settings.audio = audio;
        self
    }

    /// Build the orchestrator.
    pub fn build(self) -> Orchestrator {
        Orchestrator::new(self.platform, self.settings)
    }
}

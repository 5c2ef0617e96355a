//! Per-run settings.

use std::time::Duration;

use wakeplay_media::{PlaybackTargets, TierTimings, DEFAULT_SCHEME};

/// Output preparation done between the Bluetooth and playback stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioSettings {
    /// Make the sink named like the speaker the default output first.
    pub switch_output: bool,
    pub unmute: bool,
    /// 0 to 100; `None` leaves the volume alone.
    pub volume_percent: Option<u8>,
    pub test_sound: bool,
}

impl AudioSettings {
    pub fn is_noop(&self) -> bool {
        !self.switch_output && !self.unmute && self.volume_percent.is_none() && !self.test_sound
    }
}

/// Everything a launch-and-play run needs besides the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Case-insensitive substring of the speaker's display name.
    pub device_name: String,
    /// Fallback hardware address, colon or hyphen separated.
    pub device_address: Option<String>,
    pub nudge_wait: Duration,
    pub connect_timeout: Duration,
    pub connect_poll: Duration,
    /// Case-insensitive substring of the media session owner.
    pub app_match: String,
    /// Launched when a tier has no URI.
    pub scheme: String,
    pub targets: PlaybackTargets,
    pub timings: TierTimings,
    pub audio: AudioSettings,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            device_name: "Echo Show".to_string(),
            device_address: None,
            nudge_wait: Duration::from_millis(1500),
            connect_timeout: Duration::from_secs(12),
            connect_poll: Duration::from_secs(1),
            app_match: "spotify".to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            targets: PlaybackTargets::default(),
            timings: TierTimings::default(),
            audio: AudioSettings::default(),
        }
    }
}

//! Configuration loading and parsing.
//!
//! Every field has a default, so an absent file or section yields a working
//! setup for the stock speaker and playlist.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use wakeplay_client::{AudioSettings, PlaybackTargets, RunSettings, TierTimings};
use wakeplay_core::{poll::secs, HardwareAddress};

const DEFAULT_CONNECT_POLL_SECS: f64 = 1.0;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub device: DeviceSection,
    pub player: PlayerSection,
    pub audio: AudioSection,
    pub backend: BackendSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address (host:port).
    pub bind: SocketAddr,
    /// Announce the trigger endpoint over mDNS.
    pub advertise: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8765)),
            advertise: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceSection {
    /// Substring of the speaker's display name.
    pub name: String,
    /// Fallback hardware address.
    pub address: Option<String>,
    pub nudge_wait_secs: f64,
    pub connect_timeout_secs: f64,
    pub connect_poll_secs: f64,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            name: "Echo Show 5-1MM".to_string(),
            address: Some("A0:E7:0B:ED:D6:3F".to_string()),
            nudge_wait_secs: 1.5,
            connect_timeout_secs: 12.0,
            connect_poll_secs: DEFAULT_CONNECT_POLL_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerSection {
    pub app_match: String,
    pub scheme: String,
    pub primary_uri: Option<String>,
    pub secondary_uri: Option<String>,
    pub alternate_suffix: String,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            app_match: "spotify".to_string(),
            scheme: "spotify:".to_string(),
            primary_uri: Some("spotify:playlist:25NRSu3YOREVhyBkXQrGeE".to_string()),
            secondary_uri: None,
            alternate_suffix: ":play".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSection {
    /// Make the speaker's sink the default output before touching volume.
    pub switch_output: bool,
    /// 0 to 100, larger values are clamped.
    pub volume_percent: Option<u8>,
    pub unmute: bool,
    pub test_sound: bool,
    /// Sound played for `test_sound`; the freedesktop "complete" sound when unset.
    pub sound_file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BluetoothBackend {
    #[default]
    Bluetoothctl,
    Bluez,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendSection {
    pub bluetooth: BluetoothBackend,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        let cfg =
            toml::from_str::<Config>(&raw).with_context(|| format!("parse config {:?}", path))?;
        Ok(cfg)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("Config {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Warn about values that will only fail once a run reaches them.
    pub fn validate(&self) {
        if let Some(address) = &self.device.address {
            if let Err(e) = HardwareAddress::parse(address) {
                warn!("device.address will be rejected at run time: {}", e);
            }
        }
        if !positive(self.device.connect_poll_secs) {
            warn!(
                "device.connect_poll_secs = {} is not positive, using {}s",
                self.device.connect_poll_secs, DEFAULT_CONNECT_POLL_SECS
            );
        }
        if self.audio.volume_percent.is_some_and(|v| v > 100) {
            warn!("audio.volume_percent above 100 is clamped to 100");
        }
    }

    /// Orchestrator settings derived from the file.
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            device_name: self.device.name.clone(),
            device_address: self.device.address.clone(),
            nudge_wait: secs(self.device.nudge_wait_secs),
            connect_timeout: secs(self.device.connect_timeout_secs),
            connect_poll: if positive(self.device.connect_poll_secs) {
                secs(self.device.connect_poll_secs)
            } else {
                secs(DEFAULT_CONNECT_POLL_SECS)
            },
            app_match: self.player.app_match.clone(),
            scheme: self.player.scheme.clone(),
            targets: PlaybackTargets {
                primary: self.player.primary_uri.clone(),
                secondary: self.player.secondary_uri.clone(),
                alternate_suffix: self.player.alternate_suffix.clone(),
            },
            timings: TierTimings::default(),
            audio: AudioSettings {
                switch_output: self.audio.switch_output,
                unmute: self.audio.unmute,
                volume_percent: self.audio.volume_percent.map(|v| v.min(100)),
                test_sound: self.audio.test_sound,
            },
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

//! The set of platform backends one orchestrator talks to.

use std::path::PathBuf;
use std::sync::Arc;

use wakeplay_bluetooth::BluetoothCtl;
use wakeplay_core::{
    KeyInjector, MediaSessions, PairedDevices, ProcessLauncher, RadioControl, SystemAudio,
};
use wakeplay_media::{PlayerCtl, PulseAudio, SystemOpener, XdoTool, DEFAULT_SOUND_FILE};

/// Shared handles to every platform capability.
#[derive(Clone)]
pub struct Platform {
    pub radio: Arc<dyn RadioControl>,
    pub devices: Arc<dyn PairedDevices>,
    pub sessions: Arc<dyn MediaSessions>,
    pub launcher: Arc<dyn ProcessLauncher>,
    pub keys: Arc<dyn KeyInjector>,
    /// Skipped entirely when absent.
    pub audio: Option<Arc<dyn SystemAudio>>,
}

impl Platform {
    /// Command-line tool backends with the default confirmation sound.
    pub fn command_line() -> Self {
        Self::command_line_with_sound(DEFAULT_SOUND_FILE)
    }

    /// Command-line tool backends playing `sound_file` as the confirmation sound.
    pub fn command_line_with_sound(sound_file: impl Into<PathBuf>) -> Self {
        let bluetooth = Arc::new(BluetoothCtl::new());
        Self {
            radio: bluetooth.clone(),
            devices: bluetooth,
            sessions: Arc::new(PlayerCtl::new()),
            launcher: Arc::new(SystemOpener::new()),
            keys: Arc::new(XdoTool::new()),
            audio: Some(Arc::new(PulseAudio::new(sound_file))),
        }
    }

    /// BlueZ D-Bus for Bluetooth, command-line tools for everything else.
    #[cfg(all(feature = "bluez", target_os = "linux"))]
    pub async fn bluez_with_sound(sound_file: impl Into<PathBuf>) -> wakeplay_core::Result<Self> {
        let bluetooth = Arc::new(wakeplay_bluetooth::BluezBackend::new().await?);
        Ok(Self {
            radio: bluetooth.clone(),
            devices: bluetooth,
            ..Self::command_line_with_sound(sound_file)
        })
    }

    /// Drop the audio preparation backend.
    pub fn without_audio(mut self) -> Self {
        self.audio = None;
        self
    }
}

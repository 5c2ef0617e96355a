//! Default sink control through `pactl` and `paplay`.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use wakeplay_core::process::run_checked;
use wakeplay_core::{Error, Result, SystemAudio};

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

/// Freedesktop sound played when none is configured.
pub const DEFAULT_SOUND_FILE: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";

/// PulseAudio/PipeWire backend.
#[derive(Debug, Clone)]
pub struct PulseAudio {
    sound_file: PathBuf,
}

impl Default for PulseAudio {
    fn default() -> Self {
        Self::new(DEFAULT_SOUND_FILE)
    }
}

impl PulseAudio {
    pub fn new(sound_file: impl Into<PathBuf>) -> Self {
        Self {
            sound_file: sound_file.into(),
        }
    }
}

/// One entry of `pactl list sinks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sink {
    pub name: String,
    pub description: Option<String>,
}

impl Sink {
    fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// Parse the long `pactl list sinks` listing into name/description pairs.
pub(crate) fn parse_sinks(output: &str) -> Vec<Sink> {
    let mut sinks: Vec<Sink> = Vec::new();
    let mut in_sink = false;

    for line in output.lines() {
        if line.starts_with("Sink #") {
            in_sink = true;
            continue;
        }
        if !line.starts_with(char::is_whitespace) {
            in_sink = false;
            continue;
        }
        if !in_sink {
            continue;
        }

        let line = line.trim();
        if let Some(name) = line.strip_prefix("Name:") {
            sinks.push(Sink {
                name: name.trim().to_string(),
                description: None,
            });
        } else if let Some(description) = line.strip_prefix("Description:") {
            if let Some(sink) = sinks.last_mut() {
                sink.description.get_or_insert_with(|| description.trim().to_string());
            }
        }
    }

    sinks
}

/// `pactl` volume argument, clamped to 100%.
pub(crate) fn volume_arg(percent: u8) -> String {
    format!("{}%", percent.min(100))
}

#[async_trait]
impl SystemAudio for PulseAudio {
    async fn set_default_output(&self, name_match: &str) -> Result<()> {
        let listing = run_checked("pactl", &["list", "sinks"]).await?;
        let sink = parse_sinks(&listing)
            .into_iter()
            .find(|s| s.matches(name_match))
            .ok_or_else(|| Error::backend(format!("no output named like '{}'", name_match)))?;

        run_checked("pactl", &["set-default-sink", &sink.name]).await?;
        info!("Default output set to {}", sink.name);
        Ok(())
    }

    async fn unmute(&self) -> Result<()> {
        run_checked("pactl", &["set-sink-mute", DEFAULT_SINK, "0"]).await?;
        Ok(())
    }

    async fn set_volume(&self, percent: u8) -> Result<()> {
        let volume = volume_arg(percent);
        run_checked("pactl", &["set-sink-volume", DEFAULT_SINK, &volume]).await?;
        Ok(())
    }

    async fn play_sound(&self) -> Result<()> {
        let file = self.sound_file.to_string_lossy();
        run_checked("paplay", &[file.as_ref()]).await?;
        Ok(())
    }
}

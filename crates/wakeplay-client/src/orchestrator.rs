//! The launch-and-play run.

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use wakeplay_bluetooth::{ConnectionWaiter, DeviceLocator, LinkNudger, RadioGate};
use wakeplay_core::{Result, StepTrace};
use wakeplay_media::{AppLauncher, EscalationPlan, PlaybackEscalation, PlaybackOutcome};

use crate::platform::Platform;
use crate::report::RunReport;
use crate::settings::RunSettings;

/// Wakes the speaker, prepares the output and makes sure something plays.
///
/// Runs are serialized: a trigger arriving mid-run waits for the previous
/// one to finish.
pub struct Orchestrator {
    platform: Platform,
    settings: RunSettings,
    run_lock: Mutex<()>,
}

impl Orchestrator {
    pub fn new(platform: Platform, settings: RunSettings) -> Self {
        Self {
            platform,
            settings,
            run_lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Run every stage and report. Only the Bluetooth stage can fail the run.
    pub async fn run_launch_and_play(&self) -> RunReport {
        let _guard = self.run_lock.lock().await;
        info!("Starting launch-and-play run");

        let mut trace = StepTrace::new();
        match self.run(&mut trace).await {
            Ok(outcome) => {
                info!(
                    tier = outcome.tier(),
                    confirmed = outcome.confirmed,
                    "Launch-and-play run finished"
                );
                RunReport::success(trace)
            }
            Err(e) => {
                error!("Launch-and-play run failed: {}", e);
                RunReport::failure(trace, &e)
            }
        }
    }

    async fn run(&self, trace: &mut StepTrace) -> Result<PlaybackOutcome> {
        self.bluetooth_stage(trace).await?;
        self.prepare_audio(trace).await;
        Ok(self.playback_stage(trace).await)
    }

    /// Radio on, device located and opened, link nudged and awaited.
    ///
    /// A link still down after the wait is not an error; playback may bring it up.
    pub async fn bluetooth_stage(&self, trace: &mut StepTrace) -> Result<()> {
        let devices = self.platform.devices.as_ref();
        let name = self.settings.device_name.as_str();

        RadioGate::new(self.platform.radio.as_ref())
            .ensure_radio_on()
            .await?;
        trace.push("radio on");

        let descriptor = DeviceLocator::new(devices)
            .locate(name, self.settings.device_address.as_deref())
            .await?;
        trace.push("device found");

        let nudger = LinkNudger::new(devices);
        let handle = nudger.open(&descriptor).await?;
        if nudger.status(&handle).await.is_connected() {
            trace.push("already connected");
            return Ok(());
        }

        trace.push("nudging device");
        if nudger
            .nudge(&handle, self.settings.nudge_wait)
            .await
            .is_connected()
        {
            trace.push("connected after nudge");
            return Ok(());
        }

        let connected = ConnectionWaiter::new(devices)
            .with_poll_interval(self.settings.connect_poll)
            .wait_until_connected(name, self.settings.connect_timeout)
            .await;
        if connected {
            trace.push("connected");
        } else {
            warn!("'{}' still not connected, continuing", descriptor.label());
            trace.push("connection pending");
        }
        Ok(())
    }

    /// Switch the default output to the speaker, unmute, set volume and play
    /// the confirmation sound, as configured.
    ///
    /// Each step is independent; failures are logged and leave no label.
    pub async fn prepare_audio(&self, trace: &mut StepTrace) {
        let Some(audio) = self.platform.audio.as_deref() else {
            return;
        };
        let wanted = &self.settings.audio;

        if wanted.switch_output {
            match audio.set_default_output(&self.settings.device_name).await {
                Ok(()) => trace.push("audio output switched"),
                Err(e) => warn!("Failed to switch audio output: {}", e),
            }
        }

        if wanted.unmute {
            match audio.unmute().await {
                Ok(()) => trace.push("audio unmuted"),
                Err(e) => warn!("Failed to unmute output: {}", e),
            }
        }

        if let Some(percent) = wanted.volume_percent {
            let percent = percent.min(100);
            match audio.set_volume(percent).await {
                Ok(()) => trace.push(format!("volume set to {}%", percent)),
                Err(e) => warn!("Failed to set volume: {}", e),
            }
        }

        if wanted.test_sound {
            match audio.play_sound().await {
                Ok(()) => trace.push("test sound played"),
                Err(e) => warn!("Failed to play test sound: {}", e),
            }
        }
    }

    /// Escalate through the configured tiers. Never fails.
    pub async fn playback_stage(&self, trace: &mut StepTrace) -> PlaybackOutcome {
        let plan = EscalationPlan::new(&self.settings.targets, &self.settings.timings);
        let launcher =
            AppLauncher::new(self.platform.launcher.as_ref()).with_scheme(&self.settings.scheme);

        PlaybackEscalation::new(
            launcher,
            self.platform.sessions.as_ref(),
            self.platform.keys.as_ref(),
            &self.settings.app_match,
        )
        .run(&plan, trace)
        .await
    }
}

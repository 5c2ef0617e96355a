//! End-to-end launch-and-play runs against scripted platform fakes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wakeplay_client::{OrchestratorBuilder, Platform, RunStatus};
use wakeplay_core::{
    ConnectionStatus, DeviceDescriptor, DeviceHandle, DeviceId, DeviceSelector, Error,
    HardwareAddress, KeyInjector, MediaSessions, PairedDevices, PlaybackStatus, ProcessLauncher,
    Radio, RadioControl, RadioKind, RadioState, Result, SessionId,
};

/// Everything the fakes observed, in order.
#[derive(Default)]
struct Journal {
    events: Mutex<Vec<String>>,
}

impl Journal {
    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    fn count(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

struct FakeRadio {
    state: Mutex<Option<RadioState>>,
    journal: Arc<Journal>,
}

#[async_trait]
impl RadioControl for FakeRadio {
    async fn radios(&self) -> Result<Vec<Radio>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .map(|state| Radio {
                name: "hci0".to_string(),
                kind: RadioKind::Bluetooth,
                state,
            })
            .into_iter()
            .collect())
    }

    async fn set_state(&self, _kind: RadioKind, state: RadioState) -> Result<()> {
        self.journal.record(format!("set_state {}", state));
        *self.state.lock().unwrap() = Some(state);
        Ok(())
    }
}

struct FakeDevices {
    paired: Vec<DeviceDescriptor>,
    connected: bool,
}

#[async_trait]
impl PairedDevices for FakeDevices {
    async fn find_all(&self, selector: &DeviceSelector) -> Result<Vec<DeviceDescriptor>> {
        Ok(match selector {
            DeviceSelector::Paired => self.paired.clone(),
            DeviceSelector::PairedWithAddress(addr) => self
                .paired
                .iter()
                .filter(|d| d.hardware_address == Some(*addr))
                .cloned()
                .collect(),
        })
    }

    async fn open(&self, id: &DeviceId) -> Result<Option<DeviceHandle>> {
        Ok(self.paired.iter().find(|d| d.id == *id).map(|d| DeviceHandle {
            id: d.id.clone(),
            name: d.display_name.clone(),
        }))
    }

    async fn connection_status(&self, _handle: &DeviceHandle) -> Result<ConnectionStatus> {
        Ok(if self.connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        })
    }

    async fn probe_services(&self, _handle: &DeviceHandle) -> Result<usize> {
        Err(Error::backend("page timeout"))
    }
}

/// A media application that appears once launched and reports scripted statuses.
struct FakeMedia {
    running: Mutex<bool>,
    statuses: Mutex<VecDeque<PlaybackStatus>>,
    journal: Arc<Journal>,
}

impl FakeMedia {
    fn new(running: bool, statuses: &[PlaybackStatus], journal: Arc<Journal>) -> Self {
        Self {
            running: Mutex::new(running),
            statuses: Mutex::new(statuses.iter().copied().collect()),
            journal,
        }
    }
}

#[async_trait]
impl MediaSessions for FakeMedia {
    async fn sessions(&self) -> Result<Vec<SessionId>> {
        if *self.running.lock().unwrap() {
            Ok(vec![
                SessionId("firefox.instance_1_42".to_string()),
                SessionId("Spotify.exe".to_string()),
            ])
        } else {
            Ok(vec![])
        }
    }

    async fn owner_identity(&self, session: &SessionId) -> Result<String> {
        Ok(session.0.clone())
    }

    async fn playback_status(&self, _session: &SessionId) -> Result<PlaybackStatus> {
        let mut statuses = self.statuses.lock().unwrap();
        // The last scripted status sticks
        if statuses.len() > 1 {
            Ok(statuses.pop_front().unwrap_or(PlaybackStatus::Stopped))
        } else {
            Ok(statuses.front().copied().unwrap_or(PlaybackStatus::Stopped))
        }
    }

    async fn try_play(&self, _session: &SessionId) -> Result<()> {
        self.journal.record("try_play");
        Ok(())
    }
}

struct FakeLauncher {
    media: Arc<FakeMedia>,
    journal: Arc<Journal>,
}

impl ProcessLauncher for FakeLauncher {
    fn spawn_uri(&self, uri: &str) -> Result<()> {
        self.journal.record(format!("launch {}", uri));
        *self.media.running.lock().unwrap() = true;
        Ok(())
    }
}

struct FakeKeys {
    journal: Arc<Journal>,
}

#[async_trait]
impl KeyInjector for FakeKeys {
    async fn media_play_pause(&self) -> Result<()> {
        self.journal.record("media key");
        Ok(())
    }
}

fn echo_show() -> DeviceDescriptor {
    DeviceDescriptor {
        id: DeviceId::new("A0:E7:0B:ED:D6:3F"),
        display_name: Some("Echo Show 5-1MM".to_string()),
        hardware_address: HardwareAddress::parse("A0:E7:0B:ED:D6:3F").ok(),
    }
}

struct Scenario {
    radio: Option<RadioState>,
    paired: Vec<DeviceDescriptor>,
    connected: bool,
    app_running: bool,
    statuses: Vec<PlaybackStatus>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            radio: Some(RadioState::On),
            paired: vec![echo_show()],
            connected: true,
            app_running: false,
            statuses: vec![PlaybackStatus::Stopped],
        }
    }
}

impl Scenario {
    fn platform(self) -> (Platform, Arc<Journal>) {
        let journal = Arc::new(Journal::default());
        let media = Arc::new(FakeMedia::new(
            self.app_running,
            &self.statuses,
            journal.clone(),
        ));
        let platform = Platform {
            radio: Arc::new(FakeRadio {
                state: Mutex::new(self.radio),
                journal: journal.clone(),
            }),
            devices: Arc::new(FakeDevices {
                paired: self.paired,
                connected: self.connected,
            }),
            sessions: media.clone(),
            launcher: Arc::new(FakeLauncher {
                media,
                journal: journal.clone(),
            }),
            keys: Arc::new(FakeKeys {
                journal: journal.clone(),
            }),
            audio: None,
        };
        (platform, journal)
    }
}

#[tokio::test(start_paused = true)]
async fn connected_speaker_reports_already_connected() {
    let (platform, journal) = Scenario {
        app_running: true,
        statuses: vec![PlaybackStatus::Playing],
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform)
        .device_name("Echo Show 5-1MM")
        .build()
        .run_launch_and_play()
        .await;

    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(
        report.steps[..3],
        ["radio on", "device found", "already connected"]
    );
    assert_eq!(journal.count("set_state"), 0);
}

#[tokio::test(start_paused = true)]
async fn launched_target_plays_on_second_poll() {
    let (platform, journal) = Scenario {
        statuses: vec![PlaybackStatus::Opened, PlaybackStatus::Playing],
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform)
        .device_name("echo show")
        .primary_uri("spotify:playlist:25NRSu3YOREVhyBkXQrGeE")
        .secondary_uri("spotify:track:6rqhFgbbKwnb9MLmUQDhG6")
        .build()
        .run_launch_and_play()
        .await;

    assert_eq!(report.status, RunStatus::Success);
    assert!(report
        .steps
        .ends_with(&["launched target".to_string(), "session found".to_string(), "playing confirmed".to_string()]));
    assert_eq!(journal.count("launch"), 1);
    assert_eq!(journal.count("media key"), 0);
}

#[tokio::test(start_paused = true)]
async fn absent_device_without_address_fails() {
    let (platform, journal) = Scenario {
        paired: vec![],
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform)
        .device_name("Echo Show 5-1MM")
        .primary_uri("spotify:playlist:25NRSu3YOREVhyBkXQrGeE")
        .build()
        .run_launch_and_play()
        .await;

    assert_eq!(report.status, RunStatus::Error);
    assert_eq!(report.steps, vec!["radio on"]);
    assert!(report.error.unwrap().contains("not found"));
    assert_eq!(journal.count("launch"), 0);
}

#[tokio::test(start_paused = true)]
async fn no_session_and_no_target_sends_media_key() {
    let (platform, journal) = Scenario::default().platform();

    let report = OrchestratorBuilder::new(platform)
        .device_name("Echo Show")
        .build()
        .run_launch_and_play()
        .await;

    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(report.steps.last().map(String::as_str), Some("media key sent"));
    assert_eq!(journal.count("launch"), 0);
    assert_eq!(journal.count("media key"), 1);
}

#[tokio::test(start_paused = true)]
async fn address_fallback_finds_renamed_speaker() {
    let mut renamed = echo_show();
    renamed.display_name = Some("Living Room".to_string());
    let (platform, _journal) = Scenario {
        paired: vec![renamed],
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform)
        .device_name("Echo Show")
        .device_address("a0-e7-0b-ed-d6-3f")
        .build()
        .run_launch_and_play()
        .await;

    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(report.steps[1], "device found");
}

#[tokio::test(start_paused = true)]
async fn malformed_address_fails_when_reached() {
    let (platform, _journal) = Scenario {
        paired: vec![],
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform)
        .device_name("Echo Show")
        .device_address("A0:E7:0B")
        .build()
        .run_launch_and_play()
        .await;

    assert_eq!(report.status, RunStatus::Error);
    assert!(report.error.unwrap().contains("Invalid hardware address"));
}

#[tokio::test(start_paused = true)]
async fn missing_radio_fails_before_device_work() {
    let (platform, _journal) = Scenario {
        radio: None,
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform).build().run_launch_and_play().await;

    assert_eq!(report.status, RunStatus::Error);
    assert!(report.steps.is_empty());
}

#[tokio::test(start_paused = true)]
async fn radio_off_is_switched_on_once() {
    let (platform, journal) = Scenario {
        radio: Some(RadioState::Off),
        ..Scenario::default()
    }
    .platform();

    let orchestrator = OrchestratorBuilder::new(platform).build();
    let first = orchestrator.run_launch_and_play().await;
    let second = orchestrator.run_launch_and_play().await;

    assert_eq!(first.status, RunStatus::Success);
    assert_eq!(second.status, RunStatus::Success);
    assert_eq!(journal.count("set_state on"), 1);
}

#[tokio::test(start_paused = true)]
async fn disconnected_speaker_does_not_fail_the_run() {
    let (platform, _journal) = Scenario {
        connected: false,
        ..Scenario::default()
    }
    .platform();

    let report = OrchestratorBuilder::new(platform).build().run_launch_and_play().await;

    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(
        report.steps[..4],
        ["radio on", "device found", "nudging device", "connection pending"]
    );
}

#[tokio::test(start_paused = true)]
async fn overlapping_runs_are_serialized() {
    let (platform, journal) = Scenario::default().platform();
    let orchestrator = Arc::new(OrchestratorBuilder::new(platform).build());

    let a = tokio::spawn({
        let o = orchestrator.clone();
        async move { o.run_launch_and_play().await }
    });
    let b = tokio::spawn({
        let o = orchestrator.clone();
        async move { o.run_launch_and_play().await }
    });
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    assert_eq!(a, b);
    assert_eq!(journal.count("media key"), 2);
}

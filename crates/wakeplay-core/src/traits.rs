//! Platform capability traits.
//!
//! The orchestrator only ever talks to the operating system through these
//! seams. Each one has a command-line backend for Linux and a mockall double
//! (behind the `mock` feature) for tests.

use async_trait::async_trait;

use crate::device::{ConnectionStatus, DeviceDescriptor, DeviceHandle, DeviceId, DeviceSelector};
use crate::error::Result;
use crate::media::{PlaybackStatus, SessionId};
use crate::radio::{Radio, RadioKind, RadioState};

/// Enumerate radios and request power-state changes.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RadioControl: Send + Sync {
    /// Every radio the platform knows about, of any kind.
    async fn radios(&self) -> Result<Vec<Radio>>;

    /// Ask the first radio of `kind` to move to `state`.
    ///
    /// The platform may accept the request and still leave the radio in
    /// another state; callers must re-read `radios()` to confirm.
    async fn set_state(&self, kind: RadioKind, state: RadioState) -> Result<()>;
}

/// Paired-device enumeration and link control.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PairedDevices: Send + Sync {
    async fn find_all(&self, selector: &DeviceSelector) -> Result<Vec<DeviceDescriptor>>;

    /// Open a device by id. `Ok(None)` when the platform returns no handle.
    async fn open(&self, id: &DeviceId) -> Result<Option<DeviceHandle>>;

    async fn connection_status(&self, handle: &DeviceHandle) -> Result<ConnectionStatus>;

    /// Query remote services without cache. Returns how many were reported.
    ///
    /// Issuing the query is what makes the host page the device.
    async fn probe_services(&self, handle: &DeviceHandle) -> Result<usize>;
}

/// The OS media-session manager.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MediaSessions: Send + Sync {
    /// Live sessions in platform order.
    async fn sessions(&self) -> Result<Vec<SessionId>>;

    async fn owner_identity(&self, session: &SessionId) -> Result<String>;

    async fn playback_status(&self, session: &SessionId) -> Result<PlaybackStatus>;

    /// Request play. May be rejected while the session is changing state.
    async fn try_play(&self, session: &SessionId) -> Result<()>;
}

/// Opens a URI with the handler the OS associates with it.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ProcessLauncher: Send + Sync {
    /// Fire-and-forget; returns once the request has been handed to the OS.
    fn spawn_uri(&self, uri: &str) -> Result<()>;
}

/// Synthesizes hardware media keys.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait KeyInjector: Send + Sync {
    /// Press and release the Play/Pause media key.
    async fn media_play_pause(&self) -> Result<()>;
}

/// Default output device control used before playback.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SystemAudio: Send + Sync {
    /// Make the first output whose name or description contains `name_match`
    /// (case-insensitive) the default. Errors when none matches.
    async fn set_default_output(&self, name_match: &str) -> Result<()>;

    async fn unmute(&self) -> Result<()>;

    /// Set the default sink volume, 0 to 100.
    async fn set_volume(&self, percent: u8) -> Result<()>;

    /// Play a short sample through the default sink.
    async fn play_sound(&self) -> Result<()>;
}

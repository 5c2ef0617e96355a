//! # wakeplay-core
//!
//! Core types, traits, and error definitions shared across all wakeplay crates.
//!
//! This crate provides:
//! - Radio, paired-device and media-session representations
//! - Platform capability traits (mockable with the `mock` feature)
//! - Retry policies and the shared `poll_until` combinator
//! - The step trace returned to trigger callers
//! - Common error types

pub mod device;
pub mod error;
pub mod media;
pub mod poll;
pub mod process;
pub mod radio;
pub mod trace;
pub mod traits;

pub use device::{ConnectionStatus, DeviceDescriptor, DeviceHandle, DeviceId, DeviceSelector, HardwareAddress};
pub use error::{DeviceError, Error, PlatformError, RadioError, Result};
pub use media::{identity_matches, MediaSession, PlaybackStatus, SessionId};
pub use poll::{poll_until, RetryPolicy};
pub use radio::{Radio, RadioKind, RadioState};
pub use trace::StepTrace;
pub use traits::{KeyInjector, MediaSessions, PairedDevices, ProcessLauncher, RadioControl, SystemAudio};

#[cfg(any(test, feature = "mock"))]
pub use traits::{
    MockKeyInjector, MockMediaSessions, MockPairedDevices, MockProcessLauncher, MockRadioControl,
    MockSystemAudio,
};

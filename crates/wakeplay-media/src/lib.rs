//! # wakeplay-media
//!
//! Gets the target media application playing.
//!
//! This crate provides:
//! - URI launching through the OS handler (`AppLauncher`)
//! - Media session lookup by owner identity (`SessionLocator`)
//! - Play request and status polling (`PlaybackDriver`)
//! - The tiered escalation plan and its driver (`EscalationPlan`, `PlaybackEscalation`)
//! - Global media key fallback (`HardwareKeyFallback`)
//! - `playerctl`, `xdg-open`, `xdotool` and `pactl` backends

pub mod backend;
pub mod driver;
pub mod escalation;
pub mod fallback;
pub mod launcher;
pub mod plan;
pub mod session;

pub use backend::{PlayerCtl, PulseAudio, SystemOpener, XdoTool, DEFAULT_SOUND_FILE};
pub use driver::PlaybackDriver;
pub use escalation::{PlaybackEscalation, PlaybackOutcome};
pub use fallback::HardwareKeyFallback;
pub use launcher::{AppLauncher, DEFAULT_SCHEME};
pub use plan::{EscalationPlan, PlaybackTargets, Tier, TierAction, TierTimings};
pub use session::SessionLocator;

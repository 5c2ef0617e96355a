//! # wakeplay-client
//!
//! The launch-and-play orchestrator.
//!
//! This crate provides:
//! - `Orchestrator::run_launch_and_play`, the single entry point for a trigger
//! - `OrchestratorBuilder` for wiring platform backends and settings
//! - `RunReport`, the serializable result handed back to callers
//! - `SystemSetup` checks for the external tools the default backends need
//!
//! ## Example
//!
//! ```ignore
//! use wakeplay_client::{OrchestratorBuilder, Platform};
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator = OrchestratorBuilder::new(Platform::command_line())
//!         .device_name("Echo Show")
//!         .primary_uri("spotify:playlist:25NRSu3YOREVhyBkXQrGeE")
//!         .build();
//!
//!     let report = orchestrator.run_launch_and_play().await;
//!     println!("{:?}: {:?}", report.status, report.steps);
//! }
//! ```

mod builder;
mod orchestrator;
mod platform;
mod report;
mod settings;
mod setup;

pub use builder::OrchestratorBuilder;
pub use orchestrator::Orchestrator;
pub use platform::Platform;
pub use report::{RunReport, RunStatus};
pub use settings::{AudioSettings, RunSettings};
pub use setup::{ComponentStatus, SetupIssue, SetupStatus, SystemSetup};

// Re-export commonly used types
pub use wakeplay_core::{Error, Result, StepTrace};
pub use wakeplay_media::{
    PlaybackOutcome, PlaybackTargets, TierAction, TierTimings, DEFAULT_SOUND_FILE,
};

//! # wakeplay-bluetooth
//!
//! Brings a paired Bluetooth speaker to a connected state.
//!
//! ## Features
//!
//! - Radio power gate (`RadioGate`)
//! - Paired device lookup by name, falling back to hardware address (`DeviceLocator`)
//! - Best-effort link nudge through a service query (`LinkNudger`)
//! - Deadline-bounded connection polling (`ConnectionWaiter`)
//! - `bluetoothctl` backend, and a BlueZ D-Bus backend behind the `bluez` feature
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use wakeplay_bluetooth::{BluetoothCtl, ConnectionWaiter, DeviceLocator, LinkNudger, RadioGate};
//!
//! async fn example() -> wakeplay_core::Result<()> {
//!     let backend = BluetoothCtl::new();
//!     RadioGate::new(&backend).ensure_radio_on().await?;
//!
//!     let descriptor = DeviceLocator::new(&backend)
//!         .locate("Echo Show", Some("A0:E7:0B:ED:D6:3F"))
//!         .await?;
//!
//!     let nudger = LinkNudger::new(&backend);
//!     let handle = nudger.open(&descriptor).await?;
//!     if !nudger.nudge(&handle, Duration::from_millis(1500)).await.is_connected() {
//!         ConnectionWaiter::new(&backend)
//!             .wait_until_connected("Echo Show", Duration::from_secs(12))
//!             .await;
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod link;
pub mod locator;
pub mod radio;
pub mod waiter;

pub use backend::BluetoothCtl;
#[cfg(all(feature = "bluez", target_os = "linux"))]
pub use backend::BluezBackend;
pub use link::LinkNudger;
pub use locator::DeviceLocator;
pub use radio::{RadioGate, RadioTransition};
pub use waiter::ConnectionWaiter;

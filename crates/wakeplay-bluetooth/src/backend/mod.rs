//! Platform backends for `RadioControl` and `PairedDevices`.

mod bluetoothctl;
#[cfg(all(feature = "bluez", target_os = "linux"))]
mod bluez;

pub use bluetoothctl::BluetoothCtl;
#[cfg(all(feature = "bluez", target_os = "linux"))]
pub use bluez::BluezBackend;

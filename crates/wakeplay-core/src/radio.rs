//! Radio representation.

use std::fmt;

/// Kind of wireless transceiver managed by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioKind {
    Bluetooth,
    WiFi,
    MobileBroadband,
    Fm,
    Other,
}

/// Power state of a radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioState {
    /// Powered and usable.
    On,
    /// Powered down, can be switched on.
    Off,
    /// Blocked (hardware switch, rfkill, policy).
    Disabled,
    /// State could not be determined.
    Unknown,
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RadioState::On => "on",
            RadioState::Off => "off",
            RadioState::Disabled => "disabled",
            RadioState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A radio as reported by the platform radio manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Radio {
    /// Platform name of the radio (adapter name or controller address).
    pub name: String,
    pub kind: RadioKind,
    pub state: RadioState,
}

impl Radio {
    pub fn is_bluetooth(&self) -> bool {
        self.kind == RadioKind::Bluetooth
    }

    pub fn is_on(&self) -> bool {
        self.state == RadioState::On
    }
}

//! Paired device representation and identification types.

use std::fmt;
use std::str::FromStr;

use crate::error::DeviceError;

/// 48-bit Bluetooth hardware address, stored big-endian in the low bits of a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareAddress(u64);

impl HardwareAddress {
    const MASK: u64 = 0xFFFF_FFFF_FFFF;

    /// Wrap a raw integer; `None` if it does not fit in 48 bits.
    pub fn new(raw: u64) -> Option<Self> {
        if raw & !Self::MASK == 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The six address bytes, most significant first.
    pub fn octets(&self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }

    /// Parse a MAC address string.
    ///
    /// Separators are ignored, so all of these parse:
    /// - Colon-separated: "AA:BB:CC:DD:EE:FF"
    /// - Hyphen-separated: "AA-BB-CC-DD-EE-FF"
    /// - Space-separated: "AA BB CC DD EE FF"
    /// - Bare hex: "AABBCCDDEEFF"
    ///
    /// Anything that does not leave exactly 12 hex digits is rejected.
    pub fn parse(s: &str) -> Result<Self, DeviceError> {
        let digits: String = s.chars().filter(char::is_ascii_hexdigit).collect();

        if digits.len() != 12 {
            return Err(DeviceError::InvalidAddress(s.to_string()));
        }

        u64::from_str_radix(&digits, 16)
            .map(Self)
            .map_err(|_| DeviceError::InvalidAddress(s.to_string()))
    }
}

impl FromStr for HardwareAddress {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; 6]> for HardwareAddress {
    fn from(bytes: [u8; 6]) -> Self {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&bytes);
        Self(u64::from_be_bytes(buf))
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Opaque platform identifier used to open a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A paired device as returned by discovery. Never persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: DeviceId,
    pub display_name: Option<String>,
    pub hardware_address: Option<HardwareAddress>,
}

impl DeviceDescriptor {
    /// Case-insensitive substring test against the display name.
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.display_name
            .as_deref()
            .map(|name| name.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    /// Name for log lines.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("(unnamed)")
    }
}

/// Query scoping for paired-device enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSelector {
    /// Every device bonded with the host.
    Paired,
    /// Bonded devices whose hardware address matches exactly.
    PairedWithAddress(HardwareAddress),
}

/// An opened device, owned by a single orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub id: DeviceId,
    pub name: Option<String>,
}

/// Link state of an opened device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hardware_address {
        use super::*;

        #[test]
        fn parses_colon_separated() {
            let addr = HardwareAddress::parse("A0:E7:0B:ED:D6:3F").unwrap();
            assert_eq!(addr.as_u64(), 0xA0E7_0BED_D63F);
        }

        #[test]
        fn parses_hyphen_separated_and_lowercase() {
            let addr: HardwareAddress = "a0-e7-0b-ed-d6-3f".parse().unwrap();
            assert_eq!(addr.as_u64(), 0xA0E7_0BED_D63F);
        }

        #[test]
        fn parses_bare_hex() {
            let addr = HardwareAddress::parse("001122334455").unwrap();
            assert_eq!(addr.octets(), [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        }

        #[test]
        fn ignores_any_separator() {
            let addr = HardwareAddress::parse("A0 E7 0B ED D6 3F").unwrap();
            assert_eq!(addr.to_string(), "A0:E7:0B:ED:D6:3F");
            assert_eq!(HardwareAddress::parse("a0.e7.0b.ed.d6.3f").unwrap(), addr);
        }

        #[test]
        fn rejects_short_address() {
            let err = HardwareAddress::parse("AA:BB:CC:DD:EE").unwrap_err();
            assert!(matches!(err, DeviceError::InvalidAddress(_)));
        }

        #[test]
        fn rejects_non_hex_digits() {
            assert!(HardwareAddress::parse("GG:BB:CC:DD:EE:FF").is_err());
            assert!(HardwareAddress::parse("").is_err());
        }

        #[test]
        fn display_round_trips_octets() {
            let addr = HardwareAddress::from([0xA0, 0xE7, 0x0B, 0xED, 0xD6, 0x3F]);
            assert_eq!(addr.to_string(), "A0:E7:0B:ED:D6:3F");
            assert_eq!(HardwareAddress::parse(&addr.to_string()).unwrap(), addr);
        }

        #[test]
        fn new_rejects_values_wider_than_48_bits() {
            assert!(HardwareAddress::new(0xFFFF_FFFF_FFFF).is_some());
            assert!(HardwareAddress::new(0x1_0000_0000_0000).is_none());
        }
    }

    mod descriptor {
        use super::*;

        fn descriptor(name: Option<&str>) -> DeviceDescriptor {
            DeviceDescriptor {
                id: DeviceId::new("dev-1"),
                display_name: name.map(str::to_string),
                hardware_address: None,
            }
        }

        #[test]
        fn name_match_is_case_insensitive_substring() {
            let d = descriptor(Some("Echo Show 5-1MM"));
            assert!(d.name_contains("echo show"));
            assert!(d.name_contains("5-1mm"));
            assert!(!d.name_contains("Echo Dot"));
        }

        #[test]
        fn unnamed_device_never_matches() {
            let d = descriptor(None);
            assert!(!d.name_contains(""));
            assert_eq!(d.label(), "(unnamed)");
        }
    }
}

//! Backend that drives BlueZ through the `bluetoothctl` and `sdptool` tools.

use async_trait::async_trait;
use tracing::debug;

use wakeplay_core::process::{run, run_checked};
use wakeplay_core::{
    ConnectionStatus, DeviceDescriptor, DeviceHandle, DeviceId, DeviceSelector, Error,
    HardwareAddress, PairedDevices, PlatformError, Radio, RadioControl, RadioKind, RadioState,
    Result,
};

/// `bluetoothctl` command-line backend.
#[derive(Debug, Clone)]
pub struct BluetoothCtl {
    program: String,
}

impl Default for BluetoothCtl {
    fn default() -> Self {
        Self::new()
    }
}

impl BluetoothCtl {
    pub fn new() -> Self {
        Self {
            program: "bluetoothctl".to_string(),
        }
    }

    /// Use a different `bluetoothctl` binary (e.g. an absolute path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn info(&self, id: &DeviceId) -> Result<Option<DeviceInfo>> {
        let output = run(&self.program, &["info", id.as_str()]).await?;
        Ok(parse_info(&output.stdout))
    }
}

/// Properties read from `bluetoothctl info <addr>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DeviceInfo {
    pub name: Option<String>,
    pub paired: bool,
    pub connected: bool,
}

/// Parse `bluetoothctl show`. `None` when no controller is present.
pub(crate) fn parse_show(output: &str) -> Option<Radio> {
    if output.contains("No default controller") {
        return None;
    }

    let mut name = None;
    let mut state = RadioState::Unknown;

    for line in output.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Controller ") {
            name = rest.split_whitespace().next().map(str::to_string);
        } else if let Some(value) = line.strip_prefix("Powered:") {
            // PowerState is more precise; only fill in if not already set
            if state == RadioState::Unknown {
                state = match value.trim() {
                    "yes" => RadioState::On,
                    "no" => RadioState::Off,
                    _ => RadioState::Unknown,
                };
            }
        } else if let Some(value) = line.strip_prefix("PowerState:") {
            state = match value.trim() {
                "on" => RadioState::On,
                "off" | "off-enabling" | "on-disabling" => RadioState::Off,
                "off-blocked" => RadioState::Disabled,
                _ => state,
            };
        }
    }

    name.map(|name| Radio {
        name,
        kind: RadioKind::Bluetooth,
        state,
    })
}

/// Parse `bluetoothctl devices Paired` ("Device AA:BB:CC:DD:EE:FF Name").
pub(crate) fn parse_paired(output: &str) -> Vec<DeviceDescriptor> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Device "))
        .filter_map(|rest| {
            let mut parts = rest.splitn(2, ' ');
            let address = parts.next()?.trim();
            let hardware_address = HardwareAddress::parse(address).ok()?;
            // Unnamed devices are listed under their address with dashes
            let display_name = parts
                .next()
                .map(str::trim)
                .filter(|n| !n.is_empty() && !n.replace('-', ":").eq_ignore_ascii_case(address))
                .map(str::to_string);

            Some(DeviceDescriptor {
                id: DeviceId::new(address),
                display_name,
                hardware_address: Some(hardware_address),
            })
        })
        .collect()
}

/// Parse `bluetoothctl info`. `None` when the device is unknown to BlueZ.
pub(crate) fn parse_info(output: &str) -> Option<DeviceInfo> {
    let header = output
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("Device "))?;
    if header.ends_with("not available") {
        return None;
    }

    let mut info = DeviceInfo::default();
    for line in output.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix("Name:") {
            info.name = Some(value.trim().to_string());
        } else if line == "Paired: yes" {
            info.paired = true;
        } else if line == "Connected: yes" {
            info.connected = true;
        }
    }
    Some(info)
}

/// Count service records in `sdptool browse` output.
pub(crate) fn count_services(output: &str) -> usize {
    output
        .lines()
        .filter(|l| l.trim_start().starts_with("Service RecHandle:"))
        .count()
}

#[async_trait]
impl RadioControl for BluetoothCtl {
    async fn radios(&self) -> Result<Vec<Radio>> {
        let output = run(&self.program, &["show"]).await?;
        // Older BlueZ reports a missing controller on stderr
        let text = format!("{}\n{}", output.stdout, output.stderr);
        Ok(parse_show(&text).into_iter().collect())
    }

    async fn set_state(&self, kind: RadioKind, state: RadioState) -> Result<()> {
        if kind != RadioKind::Bluetooth {
            return Err(PlatformError::Unsupported(format!("{:?} radios", kind)).into());
        }

        match state {
            RadioState::On => {
                // A soft block makes `power on` fail outright
                match run("rfkill", &["unblock", "bluetooth"]).await {
                    Ok(out) if !out.success => debug!("rfkill unblock failed: {}", out.stderr.trim()),
                    Err(e) => debug!("rfkill unavailable: {}", e),
                    Ok(_) => {}
                }
                run_checked(&self.program, &["power", "on"]).await?;
            }
            RadioState::Off => {
                run_checked(&self.program, &["power", "off"]).await?;
            }
            other => {
                return Err(PlatformError::Unsupported(format!("setting radio {}", other)).into())
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PairedDevices for BluetoothCtl {
    async fn find_all(&self, selector: &DeviceSelector) -> Result<Vec<DeviceDescriptor>> {
        let stdout = run_checked(&self.program, &["devices", "Paired"]).await?;
        let devices = parse_paired(&stdout);

        Ok(match selector {
            DeviceSelector::Paired => devices,
            DeviceSelector::PairedWithAddress(address) => devices
                .into_iter()
                .filter(|d| d.hardware_address == Some(*address))
                .collect(),
        })
    }

    async fn open(&self, id: &DeviceId) -> Result<Option<DeviceHandle>> {
        Ok(self.info(id).await?.map(|info| DeviceHandle {
            id: id.clone(),
            name: info.name,
        }))
    }

    async fn connection_status(&self, handle: &DeviceHandle) -> Result<ConnectionStatus> {
        let info = self
            .info(&handle.id)
            .await?
            .ok_or_else(|| Error::backend(format!("device {} disappeared", handle.id)))?;

        Ok(if info.connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        })
    }

    async fn probe_services(&self, handle: &DeviceHandle) -> Result<usize> {
        // SDP browse pages the remote device
        let stdout = run_checked("sdptool", &["browse", handle.id.as_str()]).await?;
        Ok(count_services(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod show {
        use super::*;

        const POWERED: &str = "\
Controller 00:1A:7D:DA:71:13 (public)
\tName: desk
\tAlias: desk
\tPowered: yes
\tPowerState: on
\tDiscoverable: no
";

        const BLOCKED: &str = "\
Controller 00:1A:7D:DA:71:13 (public)
\tName: desk
\tPowered: no
\tPowerState: off-blocked
";

        #[test]
        fn powered_controller_is_on() {
            let radio = parse_show(POWERED).unwrap();
            assert_eq!(radio.name, "00:1A:7D:DA:71:13");
            assert_eq!(radio.kind, RadioKind::Bluetooth);
            assert_eq!(radio.state, RadioState::On);
        }

        #[test]
        fn rfkill_blocked_controller_is_disabled() {
            assert_eq!(parse_show(BLOCKED).unwrap().state, RadioState::Disabled);
        }

        #[test]
        fn older_bluez_without_power_state() {
            let radio = parse_show("Controller 00:1A:7D:DA:71:13 desk [default]\n\tPowered: no\n").unwrap();
            assert_eq!(radio.state, RadioState::Off);
        }

        #[test]
        fn missing_controller_means_no_radio() {
            assert!(parse_show("No default controller available\n").is_none());
            assert!(parse_show("").is_none());
        }
    }

    mod devices {
        use super::*;

        #[test]
        fn parses_paired_list() {
            let out = "\
Device A0:E7:0B:ED:D6:3F Echo Show 5-1MM
Device 38:18:4C:12:34:56 WH-1000XM4
Device 11:22:33:44:55:66 11-22-33-44-55-66
Device 38:18:4C:12:34:57 Faded Bed Cabe
garbage line
";
            let devices = parse_paired(out);
            assert_eq!(devices.len(), 4);
            assert_eq!(devices[0].id.as_str(), "A0:E7:0B:ED:D6:3F");
            assert_eq!(devices[0].display_name.as_deref(), Some("Echo Show 5-1MM"));
            assert_eq!(
                devices[0].hardware_address,
                Some(HardwareAddress::parse("A0:E7:0B:ED:D6:3F").unwrap())
            );
            assert_eq!(devices[2].display_name, None);
            // twelve hex letters, but not the device's own address
            assert_eq!(devices[3].display_name.as_deref(), Some("Faded Bed Cabe"));
        }

        #[test]
        fn parses_info() {
            let out = "\
Device A0:E7:0B:ED:D6:3F (public)
\tName: Echo Show 5-1MM
\tAlias: Echo Show 5-1MM
\tPaired: yes
\tTrusted: yes
\tConnected: no
";
            let info = parse_info(out).unwrap();
            assert_eq!(info.name.as_deref(), Some("Echo Show 5-1MM"));
            assert!(info.paired);
            assert!(!info.connected);
        }

        #[test]
        fn unknown_device_has_no_info() {
            assert!(parse_info("Device A0:E7:0B:ED:D6:3F not available\n").is_none());
            assert!(parse_info("").is_none());
        }

        #[test]
        fn counts_sdp_records() {
            let out = "\
Browsing A0:E7:0B:ED:D6:3F ...
Service Name: Audio Sink
Service RecHandle: 0x10001
Service Class ID List:
Service Name: AVRCP Target
Service RecHandle: 0x10002
";
            assert_eq!(count_services(out), 2);
        }
    }

    #[tokio::test]
    #[ignore = "requires real Bluetooth hardware"]
    async fn reads_local_controller() {
        let backend = BluetoothCtl::new();
        let radios = backend.radios().await.unwrap();
        assert!(radios.iter().all(Radio::is_bluetooth));
    }
}

//! BlueZ D-Bus backend.

use async_trait::async_trait;
use bluer::{Adapter, Address, Session};
use tracing::{debug, info, warn};

use wakeplay_core::{
    ConnectionStatus, DeviceDescriptor, DeviceHandle, DeviceId, DeviceSelector, Error,
    HardwareAddress, PairedDevices, PlatformError, Radio, RadioControl, RadioKind, RadioState,
    Result,
};

/// Talks to `bluetoothd` directly through `bluer`.
pub struct BluezBackend {
    session: Session,
}

impl BluezBackend {
    /// Open a BlueZ session.
    pub async fn new() -> Result<Self> {
        let session = Session::new()
            .await
            .map_err(|e| Error::backend(format!("Failed to create BlueZ session: {}", e)))?;
        Ok(Self { session })
    }

    async fn adapter(&self) -> Result<Adapter> {
        self.session
            .default_adapter()
            .await
            .map_err(|e| Error::backend(format!("Failed to get adapter: {}", e)))
    }

    fn address(id: &DeviceId) -> Result<Address> {
        id.as_str()
            .parse()
            .map_err(|_| PlatformError::Parse(format!("not a Bluetooth address: {}", id)).into())
    }

    async fn device(&self, id: &DeviceId) -> Result<bluer::Device> {
        let adapter = self.adapter().await?;
        adapter
            .device(Self::address(id)?)
            .map_err(|e| Error::backend(format!("Failed to get device {}: {}", id, e)))
    }
}

#[async_trait]
impl RadioControl for BluezBackend {
    async fn radios(&self) -> Result<Vec<Radio>> {
        let adapter = match self.session.default_adapter().await {
            Ok(adapter) => adapter,
            Err(e) => {
                debug!("No default adapter: {}", e);
                return Ok(Vec::new());
            }
        };

        let state = match adapter.is_powered().await {
            Ok(true) => RadioState::On,
            Ok(false) => RadioState::Off,
            Err(e) => {
                warn!("Failed to get power state: {}", e);
                RadioState::Unknown
            }
        };

        Ok(vec![Radio {
            name: adapter.name().to_string(),
            kind: RadioKind::Bluetooth,
            state,
        }])
    }

    async fn set_state(&self, kind: RadioKind, state: RadioState) -> Result<()> {
        let powered = match (kind, state) {
            (RadioKind::Bluetooth, RadioState::On) => true,
            (RadioKind::Bluetooth, RadioState::Off) => false,
            _ => {
                return Err(PlatformError::Unsupported(format!("{:?} -> {}", kind, state)).into())
            }
        };

        let adapter = self.adapter().await?;
        adapter
            .set_powered(powered)
            .await
            .map_err(|e| Error::backend(format!("Failed to set power state: {}", e)))?;
        info!("Bluetooth adapter {} powered {}", adapter.name(), state);
        Ok(())
    }
}

#[async_trait]
impl PairedDevices for BluezBackend {
    async fn find_all(&self, selector: &DeviceSelector) -> Result<Vec<DeviceDescriptor>> {
        let adapter = self.adapter().await?;
        let addresses = adapter
            .device_addresses()
            .await
            .map_err(|e| Error::backend(format!("Failed to list devices: {}", e)))?;

        let mut found = Vec::new();
        for addr in addresses {
            let hardware_address = HardwareAddress::from(addr.0);
            if let DeviceSelector::PairedWithAddress(wanted) = selector {
                if *wanted != hardware_address {
                    continue;
                }
            }

            let device = match adapter.device(addr) {
                Ok(device) => device,
                Err(e) => {
                    warn!("Failed to get device {}: {}", addr, e);
                    continue;
                }
            };
            if !device.is_paired().await.unwrap_or(false) {
                continue;
            }

            found.push(DeviceDescriptor {
                id: DeviceId::new(addr.to_string()),
                display_name: device.name().await.ok().flatten(),
                hardware_address: Some(hardware_address),
            });
        }
        Ok(found)
    }

    async fn open(&self, id: &DeviceId) -> Result<Option<DeviceHandle>> {
        let adapter = self.adapter().await?;
        let addr = Self::address(id)?;
        let known = adapter
            .device_addresses()
            .await
            .map_err(|e| Error::backend(format!("Failed to list devices: {}", e)))?;
        if !known.contains(&addr) {
            return Ok(None);
        }

        let name = match adapter.device(addr) {
            Ok(device) => device.name().await.ok().flatten(),
            Err(_) => None,
        };
        Ok(Some(DeviceHandle {
            id: id.clone(),
            name,
        }))
    }

    async fn connection_status(&self, handle: &DeviceHandle) -> Result<ConnectionStatus> {
        let device = self.device(&handle.id).await?;
        let connected = device
            .is_connected()
            .await
            .map_err(|e| Error::backend(format!("Failed to get connection state: {}", e)))?;
        Ok(if connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        })
    }

    async fn probe_services(&self, handle: &DeviceHandle) -> Result<usize> {
        let device = self.device(&handle.id).await?;
        let services = device
            .services()
            .await
            .map_err(|e| Error::backend(format!("Failed to enumerate services: {}", e)))?;
        Ok(services.len())
    }
}

//! Paired device lookup.

use tracing::{debug, info};

use wakeplay_core::{
    DeviceDescriptor, DeviceError, DeviceSelector, HardwareAddress, PairedDevices, Result,
};

/// Finds the target speaker among the host's paired devices.
pub struct DeviceLocator<'a> {
    devices: &'a dyn PairedDevices,
}

impl<'a> DeviceLocator<'a> {
    pub fn new(devices: &'a dyn PairedDevices) -> Self {
        Self { devices }
    }

    /// Every paired device whose display name contains `name`, in enumeration order.
    pub async fn find_all_by_name(&self, name: &str) -> Result<Vec<DeviceDescriptor>> {
        let paired = self.devices.find_all(&DeviceSelector::Paired).await?;
        debug!("{} paired device(s)", paired.len());
        Ok(paired.into_iter().filter(|d| d.name_contains(name)).collect())
    }

    /// First paired device whose display name contains `name`.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<DeviceDescriptor>> {
        Ok(self.find_all_by_name(name).await?.into_iter().next())
    }

    /// First paired device with exactly this hardware address.
    ///
    /// The address must reduce to 12 hex digits.
    pub async fn find_by_address(&self, address: &str) -> Result<Option<DeviceDescriptor>> {
        let address = HardwareAddress::parse(address)?;
        let found = self
            .devices
            .find_all(&DeviceSelector::PairedWithAddress(address))
            .await?;
        Ok(found.into_iter().next())
    }

    /// Name first, then the configured address.
    pub async fn locate(&self, name: &str, address: Option<&str>) -> Result<DeviceDescriptor> {
        if let Some(device) = self.find_by_name(name).await? {
            info!("Found paired device '{}' ({})", device.label(), device.id);
            return Ok(device);
        }

        if let Some(address) = address {
            debug!("No paired device named like '{}', trying {}", name, address);
            if let Some(device) = self.find_by_address(address).await? {
                info!("Found paired device '{}' by address {}", device.label(), address);
                return Ok(device);
            }
        }

        Err(DeviceError::NotFound {
            name: name.to_string(),
            address: address.unwrap_or("n/a").to_string(),
        }
        .into())
    }
}

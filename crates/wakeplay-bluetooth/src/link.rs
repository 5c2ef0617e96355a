//! Opening the located device and nudging its link.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use wakeplay_core::{
    ConnectionStatus, DeviceDescriptor, DeviceError, DeviceHandle, PairedDevices, Result,
};

/// Opens devices and encourages the OS to bring their link up.
pub struct LinkNudger<'a> {
    devices: &'a dyn PairedDevices,
}

impl<'a> LinkNudger<'a> {
    pub fn new(devices: &'a dyn PairedDevices) -> Self {
        Self { devices }
    }

    /// Open the descriptor's device. No handle is fatal.
    pub async fn open(&self, descriptor: &DeviceDescriptor) -> Result<DeviceHandle> {
        match self.devices.open(&descriptor.id).await? {
            Some(handle) => Ok(handle),
            None => Err(DeviceError::OpenFailed(descriptor.id.to_string()).into()),
        }
    }

    /// Current link state; a failed read counts as disconnected.
    pub async fn status(&self, handle: &DeviceHandle) -> ConnectionStatus {
        match self.devices.connection_status(handle).await {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to read connection status of {}: {}", handle.id, e);
                ConnectionStatus::Disconnected
            }
        }
    }

    /// Query the device's services uncached, wait, then report the link state.
    ///
    /// Never fails.
    pub async fn nudge(&self, handle: &DeviceHandle, wait: Duration) -> ConnectionStatus {
        match self.devices.probe_services(handle).await {
            Ok(count) => debug!("Service probe of {} returned {} service(s)", handle.id, count),
            Err(e) => warn!("Service probe of {} failed: {}", handle.id, e),
        }

        sleep(wait).await;

        let status = self.status(handle).await;
        info!("Link to {} after nudge: {:?}", handle.id, status);
        status
    }
}

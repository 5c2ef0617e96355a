//! Waiting for the speaker link to come up.

use std::time::Duration;

use tracing::{debug, info};

use wakeplay_core::{poll_until, PairedDevices, RetryPolicy};

use crate::link::LinkNudger;
use crate::locator::DeviceLocator;

/// Default delay between connection checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls every device matching a name until one reports connected.
pub struct ConnectionWaiter<'a> {
    devices: &'a dyn PairedDevices,
    poll_interval: Duration,
}

impl<'a> ConnectionWaiter<'a> {
    pub fn new(devices: &'a dyn PairedDevices) -> Self {
        Self {
            devices,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// A zero interval keeps [`DEFAULT_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        if !poll_interval.is_zero() {
            self.poll_interval = poll_interval;
        }
        self
    }

    /// `true` once any device named like `name` is connected, `false` at the deadline.
    ///
    /// Enumeration and open failures count as "not yet".
    pub async fn wait_until_connected(&self, name: &str, timeout: Duration) -> bool {
        let policy = RetryPolicy::new(self.poll_interval, timeout);
        let locator = &DeviceLocator::new(self.devices);
        let nudger = &LinkNudger::new(self.devices);

        let connected = poll_until(policy, move || async move {
            let matches = match locator.find_all_by_name(name).await {
                Ok(matches) => matches,
                Err(e) => {
                    debug!("Device enumeration failed while waiting: {}", e);
                    return None;
                }
            };

            for descriptor in &matches {
                let Ok(handle) = nudger.open(descriptor).await else {
                    continue;
                };
                if nudger.status(&handle).await.is_connected() {
                    return Some(descriptor.label().to_string());
                }
            }
            None
        })
        .await;

        match connected {
            Some(label) => {
                info!("Device '{}' connected", label);
                true
            }
            None => {
                info!("No device named like '{}' connected within {:?}", name, timeout);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;
    use wakeplay_core::{
        ConnectionStatus, DeviceDescriptor, DeviceHandle, DeviceId, Error, MockPairedDevices,
    };

    fn echo(id: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            id: DeviceId::new(id),
            display_name: Some("Echo Show 5-1MM".to_string()),
            hardware_address: None,
        }
    }

    fn open_any(devices: &mut MockPairedDevices) {
        devices.expect_open().returning(|id| {
            Ok(Some(DeviceHandle {
                id: id.clone(),
                name: None,
            }))
        });
    }

    #[tokio::test(start_paused = true)]
    async fn connects_on_third_poll() {
        let polls = Arc::new(AtomicU32::new(0));
        let mut devices = MockPairedDevices::new();
        let counter = polls.clone();
        devices.expect_find_all().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![echo("one")])
        });
        open_any(&mut devices);
        let reads = polls.clone();
        devices.expect_connection_status().returning(move |_| {
            if reads.load(Ordering::SeqCst) >= 3 {
                Ok(ConnectionStatus::Connected)
            } else {
                Ok(ConnectionStatus::Disconnected)
            }
        });

        let start = Instant::now();
        let connected = ConnectionWaiter::new(&devices)
            .wait_until_connected("echo show", Duration::from_secs(12))
            .await;

        assert!(connected);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn any_matching_device_counts() {
        let mut devices = MockPairedDevices::new();
        devices
            .expect_find_all()
            .returning(|_| Ok(vec![echo("one"), echo("two")]));
        open_any(&mut devices);
        devices.expect_connection_status().returning(|h| {
            if h.id.as_str() == "two" {
                Ok(ConnectionStatus::Connected)
            } else {
                Ok(ConnectionStatus::Disconnected)
            }
        });

        let connected = ConnectionWaiter::new(&devices)
            .wait_until_connected("echo", Duration::from_secs(12))
            .await;
        assert!(connected);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_false_within_timeout_plus_one_interval() {
        let mut devices = MockPairedDevices::new();
        devices
            .expect_find_all()
            .returning(|_| Err(Error::backend("adapter busy")));

        let timeout = Duration::from_secs(12);
        let start = Instant::now();
        let connected = ConnectionWaiter::new(&devices)
            .wait_until_connected("echo", timeout)
            .await;

        assert!(!connected);
        assert!(start.elapsed() <= timeout + DEFAULT_POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_keeps_one_second_cadence() {
        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();
        let mut devices = MockPairedDevices::new();
        devices.expect_find_all().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        });

        let connected = ConnectionWaiter::new(&devices)
            .with_poll_interval(Duration::ZERO)
            .wait_until_connected("echo", Duration::from_millis(200))
            .await;

        assert!(!connected);
        // once at the start, once at the clipped deadline
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }
}

//! Last-resort global media key.

use tracing::{info, warn};

use wakeplay_core::KeyInjector;

/// Sends the system-wide Play/Pause key.
pub struct HardwareKeyFallback<'a> {
    keys: &'a dyn KeyInjector,
}

impl<'a> HardwareKeyFallback<'a> {
    pub fn new(keys: &'a dyn KeyInjector) -> Self {
        Self { keys }
    }

    /// Press Play/Pause. Returns whether the key could be injected; never fails.
    pub async fn press(&self) -> bool {
        match self.keys.media_play_pause().await {
            Ok(()) => {
                info!("Sent media Play/Pause key");
                true
            }
            Err(e) => {
                warn!("Failed to send media key: {}", e);
                false
            }
        }
    }
}

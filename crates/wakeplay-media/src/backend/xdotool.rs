//! Media key injection with `xdotool`.

use async_trait::async_trait;

use wakeplay_core::process::run_checked;
use wakeplay_core::{KeyInjector, Result};

/// X11 keysym for the Play/Pause media key.
pub const PLAY_PAUSE_KEYSYM: &str = "XF86AudioPlay";

#[derive(Debug, Clone, Default)]
pub struct XdoTool;

impl XdoTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyInjector for XdoTool {
    async fn media_play_pause(&self) -> Result<()> {
        // `key` sends press and release
        run_checked("xdotool", &["key", PLAY_PAUSE_KEYSYM]).await?;
        Ok(())
    }
}

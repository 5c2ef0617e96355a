//! Bluetooth radio power gate.

use tracing::{debug, info, warn};

use wakeplay_core::{Radio, RadioControl, RadioError, RadioKind, RadioState, Result};

/// What `ensure_radio_on` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioTransition {
    AlreadyOn,
    SwitchedOn,
}

/// Makes sure the Bluetooth radio is powered before any device work.
pub struct RadioGate<'a> {
    control: &'a dyn RadioControl,
}

impl<'a> RadioGate<'a> {
    pub fn new(control: &'a dyn RadioControl) -> Self {
        Self { control }
    }

    /// Current Bluetooth radio, if the platform reports one.
    pub async fn bluetooth_radio(&self) -> Result<Option<Radio>> {
        let radios = self.control.radios().await?;
        debug!("Platform reports {} radio(s)", radios.len());
        Ok(radios.into_iter().find(Radio::is_bluetooth))
    }

    /// Switch the Bluetooth radio on if needed.
    ///
    /// Requests the change at most once and re-reads the state once. A radio
    /// already on is left untouched.
    pub async fn ensure_radio_on(&self) -> Result<RadioTransition> {
        let radio = self
            .bluetooth_radio()
            .await?
            .ok_or(RadioError::NoRadioFound)?;

        if radio.is_on() {
            debug!("Bluetooth radio {} already on", radio.name);
            return Ok(RadioTransition::AlreadyOn);
        }

        info!("Bluetooth radio {} is {}, switching on", radio.name, radio.state);
        if let Err(e) = self
            .control
            .set_state(RadioKind::Bluetooth, RadioState::On)
            .await
        {
            warn!("Request to power on radio failed: {}", e);
        }

        match self.bluetooth_radio().await? {
            Some(radio) if radio.is_on() => {
                info!("Bluetooth radio {} powered on", radio.name);
                Ok(RadioTransition::SwitchedOn)
            }
            Some(radio) => Err(RadioError::EnableFailed(radio.state).into()),
            None => Err(RadioError::EnableFailed(RadioState::Unknown).into()),
        }
    }
}

//! Walks an `EscalationPlan` until something plays.

use tracing::{debug, info};

use wakeplay_core::{KeyInjector, MediaSession, MediaSessions, StepTrace};

use crate::driver::PlaybackDriver;
use crate::fallback::HardwareKeyFallback;
use crate::launcher::AppLauncher;
use crate::plan::{EscalationPlan, Tier, TierAction};
use crate::session::SessionLocator;

/// Which tier ended the run, and whether playback was actually observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOutcome {
    pub action: TierAction,
    /// `false` when the media key fallback fired; its effect is never observed.
    pub confirmed: bool,
}

impl PlaybackOutcome {
    pub fn tier(&self) -> u8 {
        self.action.level()
    }
}

/// The playback stage: existing session, launches, then the media key.
pub struct PlaybackEscalation<'a> {
    launcher: AppLauncher<'a>,
    locator: SessionLocator<'a>,
    driver: PlaybackDriver<'a>,
    keys: HardwareKeyFallback<'a>,
    app_match: String,
}

impl<'a> PlaybackEscalation<'a> {
    pub fn new(
        launcher: AppLauncher<'a>,
        sessions: &'a dyn MediaSessions,
        keys: &'a dyn KeyInjector,
        app_match: impl Into<String>,
    ) -> Self {
        Self {
            launcher,
            locator: SessionLocator::new(sessions),
            driver: PlaybackDriver::new(sessions),
            keys: HardwareKeyFallback::new(keys),
            app_match: app_match.into(),
        }
    }

    /// Try each tier in order and stop at the first that confirms playback.
    ///
    /// Never fails. The media key tier ends the chain unconditionally.
    pub async fn run(&self, plan: &EscalationPlan, trace: &mut StepTrace) -> PlaybackOutcome {
        for tier in plan.tiers() {
            debug!("Trying playback tier {} ({:?})", tier.level(), tier.action);
            if let Some(outcome) = self.attempt(tier, trace).await {
                info!("Playback tier {} succeeded", outcome.tier());
                return outcome;
            }
        }

        // Plans always end with the key tier; this covers hand-built ones
        self.press_key(trace).await
    }

    async fn attempt(&self, tier: &Tier, trace: &mut StepTrace) -> Option<PlaybackOutcome> {
        match tier.action {
            TierAction::MediaKey => Some(self.press_key(trace).await),
            TierAction::ExistingSession => {
                let Some(session) = self.locator.find_session(&self.app_match).await else {
                    trace.push("no existing session");
                    return None;
                };
                trace.push("existing session found");
                self.drive(tier, &session, trace).await
            }
            TierAction::LaunchPrimary | TierAction::LaunchAlternate | TierAction::LaunchSecondary => {
                self.launcher.launch(tier.uri.as_deref());
                if let Some(label) = tier.action.launch_label() {
                    trace.push(label);
                }

                let session = match tier.session_wait {
                    Some(policy) => self.locator.wait_for_session(&self.app_match, policy).await,
                    None => self.locator.find_session(&self.app_match).await,
                };
                let Some(session) = session else {
                    trace.push("no session appeared");
                    return None;
                };
                trace.push("session found");
                self.drive(tier, &session, trace).await
            }
        }
    }

    async fn drive(
        &self,
        tier: &Tier,
        session: &MediaSession,
        trace: &mut StepTrace,
    ) -> Option<PlaybackOutcome> {
        let playing = match tier.play {
            Some(policy) => self.driver.ensure_playing(&session.id, policy).await,
            None => self.driver.is_playing(&session.id).await,
        };

        if playing {
            trace.push("playing confirmed");
            Some(PlaybackOutcome {
                action: tier.action,
                confirmed: true,
            })
        } else {
            trace.push("playback not confirmed");
            None
        }
    }

    async fn press_key(&self, trace: &mut StepTrace) -> PlaybackOutcome {
        if self.keys.press().await {
            trace.push("media key sent");
        } else {
            trace.push("media key failed");
        }
        PlaybackOutcome {
            action: TierAction::MediaKey,
            confirmed: false,
        }
    }
}

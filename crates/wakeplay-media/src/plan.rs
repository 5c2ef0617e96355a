//! The playback escalation chain as data.
//!
//! Each tier names what to do, which URI to launch (if any), how long to wait
//! for a session to appear and how long to keep asking it to play. Tiers
//! whose precondition is not met (no target configured) are left out of the
//! plan entirely, so the driver just walks the list in order.

use wakeplay_core::RetryPolicy;

/// What a tier does before driving playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierAction {
    /// Play whatever session the application already has.
    ExistingSession,
    /// Launch the primary target URI.
    LaunchPrimary,
    /// Relaunch the primary target with the legacy auto-play suffix.
    LaunchAlternate,
    /// Launch the secondary target URI.
    LaunchSecondary,
    /// Global Play/Pause key.
    MediaKey,
}

impl TierAction {
    /// Position in the escalation order, 0 through 4.
    pub fn level(&self) -> u8 {
        match self {
            TierAction::ExistingSession => 0,
            TierAction::LaunchPrimary => 1,
            TierAction::LaunchAlternate => 2,
            TierAction::LaunchSecondary => 3,
            TierAction::MediaKey => 4,
        }
    }

    /// Step label recorded when the tier's launch is issued.
    pub fn launch_label(&self) -> Option<&'static str> {
        match self {
            TierAction::LaunchPrimary => Some("launched target"),
            TierAction::LaunchAlternate => Some("relaunched target with alternate uri"),
            TierAction::LaunchSecondary => Some("launched fallback target"),
            TierAction::ExistingSession | TierAction::MediaKey => None,
        }
    }
}

/// One step of the escalation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub action: TierAction,
    /// URI handed to the launcher, for launch tiers.
    pub uri: Option<String>,
    /// How long to wait for a session after launching.
    pub session_wait: Option<RetryPolicy>,
    /// How long to keep requesting play. `None` for the media key tier.
    pub play: Option<RetryPolicy>,
}

impl Tier {
    pub fn level(&self) -> u8 {
        self.action.level()
    }
}

/// URIs the user wants played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackTargets {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    /// Appended to the primary URI for the alternate relaunch.
    pub alternate_suffix: String,
}

impl Default for PlaybackTargets {
    fn default() -> Self {
        Self {
            primary: None,
            secondary: None,
            alternate_suffix: ":play".to_string(),
        }
    }
}

/// Wait and play policies for every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierTimings {
    pub existing_play: RetryPolicy,
    pub primary_wait: RetryPolicy,
    pub primary_play: RetryPolicy,
    pub alternate_wait: RetryPolicy,
    pub alternate_play: RetryPolicy,
    pub secondary_wait: RetryPolicy,
    pub secondary_play: RetryPolicy,
}

const fn policy(timeout_ms: u64) -> RetryPolicy {
    RetryPolicy::new(
        std::time::Duration::from_millis(400),
        std::time::Duration::from_millis(timeout_ms),
    )
}

impl Default for TierTimings {
    fn default() -> Self {
        Self {
            existing_play: policy(3_000),
            primary_wait: policy(8_000),
            primary_play: policy(4_000),
            alternate_wait: policy(4_000),
            alternate_play: policy(3_000),
            secondary_wait: policy(6_000),
            secondary_play: policy(3_000),
        }
    }
}

/// Ordered tiers to try until one confirms playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPlan {
    tiers: Vec<Tier>,
}

impl EscalationPlan {
    pub fn new(targets: &PlaybackTargets, timings: &TierTimings) -> Self {
        let mut tiers = vec![Tier {
            action: TierAction::ExistingSession,
            uri: None,
            session_wait: None,
            play: Some(timings.existing_play),
        }];

        if let Some(primary) = &targets.primary {
            tiers.push(Tier {
                action: TierAction::LaunchPrimary,
                uri: Some(primary.clone()),
                session_wait: Some(timings.primary_wait),
                play: Some(timings.primary_play),
            });
            tiers.push(Tier {
                action: TierAction::LaunchAlternate,
                uri: Some(format!("{}{}", primary, targets.alternate_suffix)),
                session_wait: Some(timings.alternate_wait),
                play: Some(timings.alternate_play),
            });
        }

        if let Some(secondary) = &targets.secondary {
            tiers.push(Tier {
                action: TierAction::LaunchSecondary,
                uri: Some(secondary.clone()),
                session_wait: Some(timings.secondary_wait),
                play: Some(timings.secondary_play),
            });
        }

        tiers.push(Tier {
            action: TierAction::MediaKey,
            uri: None,
            session_wait: None,
            play: None,
        });

        Self { tiers }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn actions(&self) -> Vec<TierAction> {
        self.tiers.iter().map(|t| t.action).collect()
    }
}

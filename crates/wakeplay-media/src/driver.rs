//! Play requests and playback confirmation.

use tracing::debug;

use wakeplay_core::{poll_until, MediaSessions, RetryPolicy, SessionId};

/// Drives one session toward the playing state.
pub struct PlaybackDriver<'a> {
    sessions: &'a dyn MediaSessions,
}

impl<'a> PlaybackDriver<'a> {
    pub fn new(sessions: &'a dyn MediaSessions) -> Self {
        Self { sessions }
    }

    /// Whether the session currently reports `Playing`. Read errors count as not playing.
    pub async fn is_playing(&self, session: &SessionId) -> bool {
        match self.sessions.playback_status(session).await {
            Ok(status) => {
                debug!("Session {} status {:?}", session, status);
                status.is_playing()
            }
            Err(e) => {
                debug!("Failed to read status of {}: {}", session, e);
                false
            }
        }
    }

    /// Request play and re-check until playing or the policy deadline passes.
    ///
    /// Play requests are re-issued every iteration; rejected ones are ignored.
    pub async fn ensure_playing(&self, session: &SessionId, policy: RetryPolicy) -> bool {
        let sessions = self.sessions;
        poll_until(policy, move || async move {
            if let Err(e) = sessions.try_play(session).await {
                debug!("Play request for {} rejected: {}", session, e);
            }
            self.is_playing(session).await.then_some(())
        })
        .await
        .is_some()
    }
}

//! Locating the target application's media session.

use tracing::{debug, warn};

use wakeplay_core::{identity_matches, poll_until, MediaSession, MediaSessions, RetryPolicy};

/// Finds the session owned by the target application.
pub struct SessionLocator<'a> {
    sessions: &'a dyn MediaSessions,
}

impl<'a> SessionLocator<'a> {
    pub fn new(sessions: &'a dyn MediaSessions) -> Self {
        Self { sessions }
    }

    /// First session whose owner identity contains `app_match`, ignoring case.
    ///
    /// Sessions whose identity cannot be read are skipped. An enumeration
    /// failure reads as "no session".
    pub async fn find_session(&self, app_match: &str) -> Option<MediaSession> {
        let ids = match self.sessions.sessions().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Failed to enumerate media sessions: {}", e);
                return None;
            }
        };

        for id in ids {
            match self.sessions.owner_identity(&id).await {
                Ok(identity) if identity_matches(&identity, app_match) => {
                    debug!("Session {} belongs to {}", id, identity);
                    return Some(MediaSession {
                        id,
                        owner_identity: identity,
                    });
                }
                Ok(_) => {}
                Err(e) => debug!("Skipping session {}: {}", id, e),
            }
        }
        None
    }

    /// Poll `find_session` until it succeeds or the policy deadline passes.
    pub async fn wait_for_session(
        &self,
        app_match: &str,
        policy: RetryPolicy,
    ) -> Option<MediaSession> {
        poll_until(policy, move || self.find_session(app_match)).await
    }
}

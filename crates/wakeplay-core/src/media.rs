//! Media session types.

use std::fmt;

/// Playback status reported by a media session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Closed,
    Opened,
    Changing,
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Playing)
    }
}

/// Platform identifier of a session, valid only until the next enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A located session belonging to the target application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSession {
    pub id: SessionId,
    pub owner_identity: String,
}

/// Case-insensitive owner match ("Spotify.exe", "spotify", "org.mpris.MediaPlayer2.spotify").
pub fn identity_matches(identity: &str, app_match: &str) -> bool {
    identity.to_lowercase().contains(&app_match.to_lowercase())
}

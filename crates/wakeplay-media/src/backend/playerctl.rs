//! MPRIS media sessions through `playerctl`.

use async_trait::async_trait;

use wakeplay_core::process::{run, run_checked};
use wakeplay_core::{MediaSessions, PlatformError, PlaybackStatus, Result, SessionId};

const NO_PLAYERS: &str = "No players found";

/// `playerctl` command-line backend.
///
/// Session ids are MPRIS player names such as `spotify` or
/// `chromium.instance4182`; the player name doubles as the owner identity.
#[derive(Debug, Clone)]
pub struct PlayerCtl {
    program: String,
}

impl Default for PlayerCtl {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerCtl {
    pub fn new() -> Self {
        Self {
            program: "playerctl".to_string(),
        }
    }
}

pub(crate) fn parse_players(output: &str) -> Vec<SessionId> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| SessionId(l.to_string()))
        .collect()
}

pub(crate) fn parse_status(output: &str) -> Result<PlaybackStatus> {
    match output.trim() {
        "Playing" => Ok(PlaybackStatus::Playing),
        "Paused" => Ok(PlaybackStatus::Paused),
        "Stopped" => Ok(PlaybackStatus::Stopped),
        other => Err(PlatformError::Parse(format!("playback status '{}'", other)).into()),
    }
}

#[async_trait]
impl MediaSessions for PlayerCtl {
    async fn sessions(&self) -> Result<Vec<SessionId>> {
        let output = run(&self.program, &["--list-all"]).await?;
        if !output.success && output.stderr.contains(NO_PLAYERS) {
            return Ok(Vec::new());
        }
        let stdout = output.into_stdout("playerctl --list-all")?;
        Ok(parse_players(&stdout))
    }

    async fn owner_identity(&self, session: &SessionId) -> Result<String> {
        Ok(session.0.clone())
    }

    async fn playback_status(&self, session: &SessionId) -> Result<PlaybackStatus> {
        let output = run(&self.program, &["--player", &session.0, "status"]).await?;
        if !output.success && output.stderr.contains("No player") {
            // Player exited since enumeration
            return Ok(PlaybackStatus::Closed);
        }
        let stdout = output.into_stdout("playerctl status")?;
        parse_status(&stdout)
    }

    async fn try_play(&self, session: &SessionId) -> Result<()> {
        run_checked(&self.program, &["--player", &session.0, "play"]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_player_list() {
        let players = parse_players("spotify\nchromium.instance4182\n\n");
        assert_eq!(
            players,
            vec![
                SessionId("spotify".to_string()),
                SessionId("chromium.instance4182".to_string())
            ]
        );
    }

    #[test]
    fn parses_status_words() {
        assert_eq!(parse_status("Playing\n").unwrap(), PlaybackStatus::Playing);
        assert_eq!(parse_status("Paused").unwrap(), PlaybackStatus::Paused);
        assert_eq!(parse_status("Stopped").unwrap(), PlaybackStatus::Stopped);
        assert!(parse_status("Buffering").is_err());
    }
}

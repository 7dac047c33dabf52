//! Best-effort breakthrough sound.
//!
//! Playback goes through the platform's command-line player on a detached
//! tokio task. Nothing here ever reports an error to the caller.

use std::io;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tokio::task::JoinHandle;

/// Plays a sound file without blocking the caller.
#[derive(Debug, Clone)]
pub struct SoundPlayer {
    path: PathBuf,
    player: Option<PlayerCommand>,
}

/// Program and leading arguments used to play a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    /// Player for the current platform.
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "windows") {
            Self {
                program: "cmd".to_string(),
                args: vec![
                    "/C".to_string(),
                    "start".to_string(),
                    "/min".to_string(),
                    "wmplayer".to_string(),
                ],
            }
        } else if cfg!(target_os = "macos") {
            Self {
                program: "afplay".to_string(),
                args: Vec::new(),
            }
        } else {
            Self {
                program: "aplay".to_string(),
                args: vec!["-q".to_string()],
            }
        }
    }
}

impl SoundPlayer {
    /// Player for `path` using the platform default command.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            player: Some(PlayerCommand::for_current_platform()),
        }
    }

    /// Player with an explicit command, or none to stay silent.
    pub fn with_command(path: impl Into<PathBuf>, player: Option<PlayerCommand>) -> Self {
        Self {
            path: path.into(),
            player,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Spawn playback and return immediately.
    ///
    /// The handle is returned for tests; callers are free to drop it, which
    /// detaches the task. Must be called from within a tokio runtime.
    pub fn play_detached(&self) -> JoinHandle<()> {
        let path = self.path.clone();
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(e) = play(&path, player.as_ref()).await {
                tracing::debug!("Breakthrough sound not played ({}): {}", path.display(), e);
            }
        })
    }
}

async fn play(path: &Path, player: Option<&PlayerCommand>) -> io::Result<()> {
    let Some(player) = player else {
        return Ok(());
    };
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("sound file {} not found", path.display()),
        ));
    }

    let status = Command::new(&player.program)
        .args(&player.args)
        .arg(path)
        .kill_on_drop(false)
        .status()
        .await?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "{} exited with {}",
            player.program, status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_swallowed() {
        let player = SoundPlayer::new("/definitely/not/here.mp3");
        let handle = player.play_detached();
        // The task finishes without panicking even though playback failed
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn missing_program_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let sound = dir.path().join("ping.mp3");
        std::fs::write(&sound, b"not really audio").unwrap();

        let player = SoundPlayer::with_command(
            &sound,
            Some(PlayerCommand {
                program: "qvc-no-such-player".to_string(),
                args: Vec::new(),
            }),
        );
        player.play_detached().await.unwrap();
    }

    #[tokio::test]
    async fn silent_player_does_nothing() {
        let player = SoundPlayer::with_command("anything.mp3", None);
        player.play_detached().await.unwrap();
        assert_eq!(player.path(), Path::new("anything.mp3"));
    }

    #[test]
    fn platform_player_is_known() {
        let cmd = PlayerCommand::for_current_platform();
        assert!(["aplay", "afplay", "cmd"].contains(&cmd.program.as_str()));
    }
}

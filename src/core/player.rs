//! Audio file cue backed by an external player process
//!
//! Each `play` spawns `<player> <file>`. Rewinding stops the process still
//! running, so a re-trigger restarts the sound from the top.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::oneshot;
use crate::core::surface::{AudioCue, PlaybackCompletion};
use crate::types::CueError;

/// Player used when none is configured
pub fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "aplay"
    }
}

#[derive(Debug)]
pub struct PlayerCue {
    path: PathBuf,
    player: String,
    /// Stops the running playback, if any
    stop: Option<oneshot::Sender<()>>,
}

impl PlayerCue {
    pub fn new(path: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            player: player.into(),
            stop: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_playing(&self) -> bool {
        self.stop.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

impl AudioCue for PlayerCue {
    fn reset_position(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    fn play(&mut self, completion: PlaybackCompletion) -> Result<(), CueError> {
        if !self.path.is_file() {
            return Err(CueError::MissingResource(self.path.clone()));
        }
        let handle = tokio::runtime::Handle::try_current().map_err(|_| CueError::NoRuntime)?;
        let _guard = handle.enter();

        let mut child = Command::new(&self.player)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CueError::Spawn {
                player: self.player.clone(),
                source,
            })?;

        let (tx, rx) = oneshot::channel();
        self.stop = Some(tx);

        handle.spawn(async move {
            tokio::select! {
                status = child.wait() => match status {
                    Ok(status) if status.success() => completion.succeeded(),
                    Ok(status) => completion.failed(CueError::PlayerExit(status)),
                    Err(e) => completion.failed(CueError::Output(e)),
                },
                _ = rx => {
                    // Superseded: the sound did start, it just got cut short.
                    let _ = child.kill().await;
                    log::debug!("{} cue restarted", completion.channel());
                    completion.succeeded();
                }
            }
        });
        Ok(())
    }
}

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::wheel::{Cue, EffectError};

/// Where each cue's sound comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioSettings {
    pub enabled: bool,
    /// External command that plays a file, e.g. `paplay` or `afplay`
    pub player: Option<String>,
    pub spin_sound: Option<PathBuf>,
    pub win_sound: Option<PathBuf>,
    /// Ring the terminal bell for the win cue when no file is configured
    pub bell: bool,
}

/// Fire-and-forget sound playback. Files are handed to a detached player
/// process; the loop never waits for it.
#[derive(Debug, Clone)]
pub struct AudioPlayer {
    settings: AudioSettings,
}

impl AudioPlayer {
    pub fn new(settings: AudioSettings) -> Self {
        Self { settings }
    }

    pub fn play(&self, cue: Cue) -> Result<(), EffectError> {
        if !self.settings.enabled {
            return Ok(());
        }

        let source = match cue {
            Cue::Spin => self.settings.spin_sound.as_ref(),
            Cue::Win => self.settings.win_sound.as_ref(),
        };

        match source {
            Some(path) => self.spawn_player(path),
            None if cue == Cue::Win && self.settings.bell => ring_bell(),
            None => Ok(()),
        }
    }

    fn spawn_player(&self, path: &Path) -> Result<(), EffectError> {
        let player = self
            .settings
            .player
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| EffectError::Audio("no audio player configured".into()))?;

        if !path.exists() {
            return Err(EffectError::Audio(format!(
                "sound file not found: {}",
                path.display()
            )));
        }

        // tokio reaps the detached child, which needs a running runtime
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(EffectError::Audio("no async runtime for playback".into()));
        }

        tokio::process::Command::new(player)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| EffectError::Audio(format!("{player}: {e}")))?;

        debug!("playing {} with {}", path.display(), player);
        Ok(())
    }
}

fn ring_bell() -> Result<(), EffectError> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(b"\x07")
        .and_then(|_| stdout.flush())
        .map_err(|e| EffectError::Audio(format!("terminal bell: {e}")))
}

//! Sound cue playback
//!
//! The terminal has no mixer, so cues are rendered as BEL characters: one for
//! eating, two for a collision.

use anyhow::{Context, Result};
use std::io::Write;

use crate::game::SoundCue;

/// Plays one-shot sound cues emitted by the game
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Rings the terminal bell on the wrapped writer
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bells(cue: SoundCue) -> &'static [u8] {
        match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::Collide => b"\x07\x07",
        }
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        self.out
            .write_all(Self::bells(cue))
            .and_then(|_| self.out.flush())
            .with_context(|| format!("Failed to play {:?} cue", cue))
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl CuePlayer for Muted {
    fn play(&mut self, _cue: SoundCue) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_per_cue() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(SoundCue::Eat).unwrap();
        bell.play(SoundCue::Collide).unwrap();

        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_muted_player() {
        let mut muted = Muted;
        assert!(muted.play(SoundCue::Collide).is_ok());
    }
}

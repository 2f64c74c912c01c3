use anyhow::Result;

/// Local audio output for beeps and recorded verbal commands.
/// Playback must not block the caller.
pub trait CuePlayer {
    fn play_clip(&mut self, clip: &str) -> Result<()>;
    fn beep(&mut self) -> Result<()>;
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play_clip(&mut self, _clip: &str) -> Result<()> {
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        Ok(())
    }
}

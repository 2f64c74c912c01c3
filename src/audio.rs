use anyhow::{Context, Result};
use eogcal_sequencer::CuePlayer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

const BEEP_HZ: f32 = 1000.0;
const BEEP_LENGTH: Duration = Duration::from_millis(100);

/// Plays verbal command clips and the beep on the default output device.
///
/// Every cue goes straight to the mixer, so a beep never waits for a clip
/// that is still playing.
pub struct RodioCuePlayer {
    // dropping the stream silences everything
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clip_dir: PathBuf,
}

impl RodioCuePlayer {
    pub fn new(clip_dir: impl Into<PathBuf>) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output stream")?;
        Ok(Self {
            _stream: stream,
            handle,
            clip_dir: clip_dir.into(),
        })
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play_clip(&mut self, clip: &str) -> Result<()> {
        let path = self.clip_dir.join(clip);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open clip {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode clip {}", path.display()))?;
        self.handle
            .play_raw(source.convert_samples())
            .context("Failed to play clip")?;
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        let source = rodio::source::SineWave::new(BEEP_HZ)
            .take_duration(BEEP_LENGTH)
            .amplify(0.3);
        self.handle.play_raw(source).context("Failed to play beep")?;
        Ok(())
    }
}

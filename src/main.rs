use anyhow::{Context, Result};
use clap::Parser;
use eogcal_core::Marker;
use eogcal_render::MarkerRenderer;
use eogcal_sequencer::{AudioRoute, BeepMode, CalibrationSequencer};
use eogcal_sync::SyncChannels;
use eogcal_timing::{HighPrecisionTimer, Timer};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod audio;
mod headless;
mod settings;

use app::App;
use audio::RodioCuePlayer;
use headless::LoggingMarker;
use settings::{Calibration, Settings};

const HEADLESS_SIZE: (f32, f32) = (1920.0, 1080.0);

/// Presents the EOG calibration target sequence and keeps recorders in sync
#[derive(Parser, Debug)]
#[command(name = "eogcal", version, about)]
struct Cli {
    /// Settings file (defaults to settings.json in the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run one calibration without opening a window
    #[arg(long)]
    headless: bool,

    /// Tick interval of the headless run in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5)]
    tick_ms: u64,

    /// Open a normal window instead of going fullscreen
    #[arg(short, long)]
    windowed: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG still wins
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let path = match cli.config {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let settings = Settings::load_or_init(&path)?;
    settings
        .validate_hosts()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    let calibration = settings
        .calibration()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    let channels = settings.open_channels()?;
    info!(
        "{} targets, reference {:?}, beep {:?}, audio {:?}",
        calibration.order.len(),
        calibration.order.reference(),
        calibration.config.beep,
        calibration.config.audio_route
    );

    if cli.headless {
        let sequencer = build(
            &calibration,
            channels,
            HighPrecisionTimer::new(),
            LoggingMarker::default(),
        )
        .with_display_size(HEADLESS_SIZE.0, HEADLESS_SIZE.1);
        let mut sequencer = with_local_audio(sequencer, &calibration);
        let report = headless::run(&mut sequencer, Duration::from_millis(cli.tick_ms.max(1)));
        if !report.completed {
            warn!("Headless run ended before the last target");
        }
        return Ok(());
    }

    let renderer = MarkerRenderer::new(0, 0, calibration.config.style.clone())?;
    let sequencer = build(&calibration, channels, HighPrecisionTimer::new(), renderer);
    let sequencer = with_local_audio(sequencer, &calibration);
    App::new(sequencer, settings.remote.clone(), !cli.windowed).run()
}

fn build<T: Timer, M: Marker>(
    calibration: &Calibration,
    channels: SyncChannels,
    timer: T,
    marker: M,
) -> CalibrationSequencer<T, M> {
    CalibrationSequencer::new(
        calibration.config.clone(),
        calibration.order.clone(),
        timer,
        marker,
    )
    .with_channels(channels)
}

/// Attaches the speaker when anything would be played locally. Without an
/// audio device the run goes on silently.
fn with_local_audio<T: Timer, M: Marker>(
    sequencer: CalibrationSequencer<T, M>,
    calibration: &Calibration,
) -> CalibrationSequencer<T, M> {
    let config = &calibration.config;
    let needs_audio = config.audio_route == AudioRoute::Local
        && (config.beep != BeepMode::Off || config.use_verbal_commands);
    if !needs_audio {
        return sequencer;
    }
    match RodioCuePlayer::new(calibration.clip_dir.clone()) {
        Ok(player) => sequencer.with_cue_player(player),
        Err(e) => {
            warn!("{e:#}; continuing without local audio");
            sequencer
        }
    }
}

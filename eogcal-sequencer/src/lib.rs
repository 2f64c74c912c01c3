pub mod config;
pub mod cue;
pub mod event;
pub mod run;
pub mod state;

pub use config::{AudioRoute, BeepMode, SequencerConfig};
pub use cue::{CuePlayer, SilentCuePlayer};
pub use event::SequencerEvent;
pub use run::RunState;
pub use state::CalibrationSequencer;

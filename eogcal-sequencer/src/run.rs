use eogcal_core::SequencerState;
use std::time::Duration;

/// Mutable progress of one calibration run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    pub state: SequencerState,
    /// Position in the order, `None` before the first target.
    pub cursor: Option<usize>,
    pub target_started_at: Option<Duration>,
    /// `None` while no pause is running.
    pub pause_started_at: Option<Duration>,
    pub recording: bool,
}

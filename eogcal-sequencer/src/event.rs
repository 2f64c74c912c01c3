use eogcal_core::SequencerState;

/// What happened during a tick or command, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    Started,
    PauseBegan(SequencerState),
    /// A marker became visible. `cursor` is `None` for the reference.
    Shown {
        cursor: Option<usize>,
        layout_index: usize,
    },
    Hidden,
    Completed,
    Stopped,
}

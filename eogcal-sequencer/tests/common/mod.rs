#![allow(dead_code)]

use anyhow::{Result, anyhow};
use eogcal_core::{Marker, OrderEntry, Point, TargetOrder};
use eogcal_sequencer::{CalibrationSequencer, CuePlayer, SequencerConfig, SequencerEvent};
use eogcal_sync::{
    AudioCue, RemoteAudio, RemoteCommand, RemoteControl, SyncChannels, SyncError,
    TriggerChannel, TriggerCode,
};
use eogcal_timing::{ManualTimer, Timer};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything the sequencer did to the outside world, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Position(Point),
    Visible(bool),
    StartRecording,
    StopRecording,
    Trigger(TriggerCode),
    Remote(RemoteCommand),
    RemoteCue(AudioCue),
    LocalClip(String),
    LocalBeep,
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Record>>>);

impl Journal {
    pub fn push(&self, record: Record) {
        self.0.lock().unwrap().push(record);
    }

    pub fn records(&self) -> Vec<Record> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn count(&self, pred: impl Fn(&Record) -> bool) -> usize {
        self.records().iter().filter(|r| pred(r)).count()
    }
}

pub struct RecordingMarker {
    journal: Journal,
    visible: bool,
    pub position: Point,
}

impl Marker for RecordingMarker {
    fn set_position(&mut self, position: Point) {
        self.position = position;
        self.journal.push(Record::Position(position));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.journal.push(Record::Visible(visible));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

struct RecordingTrigger(Journal);

impl TriggerChannel for RecordingTrigger {
    fn start_recording(&mut self) -> Result<(), SyncError> {
        self.0.push(Record::StartRecording);
        Ok(())
    }

    fn stop_recording(&mut self) -> Result<(), SyncError> {
        self.0.push(Record::StopRecording);
        Ok(())
    }

    fn send_trigger(&mut self, code: TriggerCode) -> Result<(), SyncError> {
        self.0.push(Record::Trigger(code));
        Ok(())
    }
}

struct RecordingRemote(Journal);

impl RemoteControl for RecordingRemote {
    fn send(&mut self, command: &RemoteCommand) -> Result<(), SyncError> {
        self.0.push(Record::Remote(command.clone()));
        Ok(())
    }
}

struct RecordingAudio(Journal);

impl RemoteAudio for RecordingAudio {
    fn play_cue(&mut self, cue: AudioCue) -> Result<(), SyncError> {
        self.0.push(Record::RemoteCue(cue));
        Ok(())
    }
}

struct RecordingCues(Journal);

impl CuePlayer for RecordingCues {
    fn play_clip(&mut self, clip: &str) -> Result<()> {
        self.0.push(Record::LocalClip(clip.to_string()));
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        self.0.push(Record::LocalBeep);
        Ok(())
    }
}

/// A channel whose peer is always unreachable.
pub struct DeadTrigger;

fn unreachable_peer() -> SyncError {
    SyncError::Io {
        channel: "trigger",
        source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "unreachable"),
    }
}

impl TriggerChannel for DeadTrigger {
    fn start_recording(&mut self) -> Result<(), SyncError> {
        Err(unreachable_peer())
    }

    fn stop_recording(&mut self) -> Result<(), SyncError> {
        Err(unreachable_peer())
    }

    fn send_trigger(&mut self, _code: TriggerCode) -> Result<(), SyncError> {
        Err(unreachable_peer())
    }
}

/// A cue player whose audio device is gone.
pub struct MuteDevice;

impl CuePlayer for MuteDevice {
    fn play_clip(&mut self, clip: &str) -> Result<()> {
        Err(anyhow!("no audio device for {clip}"))
    }

    fn beep(&mut self) -> Result<()> {
        Err(anyhow!("no audio device"))
    }
}

pub type TestSequencer = CalibrationSequencer<ManualTimer, RecordingMarker>;

pub struct Rig {
    pub sequencer: TestSequencer,
    pub timer: ManualTimer,
    pub journal: Journal,
}

pub const WIDTH: f32 = 1920.0;
pub const HEIGHT: f32 = 1080.0;

/// Sequencer with every channel and the local cue player recording into
/// one journal.
pub fn rig(config: SequencerConfig, order: TargetOrder) -> Rig {
    let timer = ManualTimer::new();
    let journal = Journal::default();
    let marker = RecordingMarker {
        journal: journal.clone(),
        visible: false,
        position: (0.0, 0.0),
    };
    let channels = SyncChannels::disabled()
        .with_trigger(RecordingTrigger(journal.clone()))
        .with_remote(RecordingRemote(journal.clone()))
        .with_audio(RecordingAudio(journal.clone()));

    let sequencer = CalibrationSequencer::new(config, order, timer.clone(), marker)
        .with_channels(channels)
        .with_cue_player(RecordingCues(journal.clone()))
        .with_display_size(WIDTH, HEIGHT);

    Rig {
        sequencer,
        timer,
        journal,
    }
}

pub fn order(indices: &[usize], reference: Option<usize>) -> TargetOrder {
    TargetOrder::resolve(
        indices.iter().copied().map(OrderEntry::new).collect(),
        reference,
    )
    .unwrap()
}

pub fn scenario_config() -> SequencerConfig {
    SequencerConfig {
        target_duration: Duration::from_secs(2),
        pause_duration: Duration::from_millis(250),
        ..SequencerConfig::default()
    }
}

pub const STEP: Duration = Duration::from_millis(10);

impl Rig {
    /// Ticks in `STEP` increments for `span`, collecting all events.
    pub fn run_for(&mut self, span: Duration) -> Vec<SequencerEvent> {
        let mut events = self.sequencer.update();
        let mut elapsed = Duration::ZERO;
        while elapsed < span {
            self.timer.advance(STEP);
            elapsed += STEP;
            events.extend(self.sequencer.update());
        }
        events
    }

    /// Ticks until the run ends; returns the events and the time it took.
    pub fn run_to_completion(&mut self, limit: Duration) -> (Vec<SequencerEvent>, Duration) {
        let start = self.timer.now();
        let mut events = self.sequencer.update();
        while self.sequencer.is_running() {
            assert!(
                self.timer.now() - start < limit,
                "run did not finish within {limit:?}"
            );
            self.timer.advance(STEP);
            events.extend(self.sequencer.update());
        }
        (events, self.timer.now() - start)
    }
}

pub fn shown(events: &[SequencerEvent]) -> Vec<(Option<usize>, usize)> {
    events
        .iter()
        .filter_map(|e| match e {
            SequencerEvent::Shown {
                cursor,
                layout_index,
            } => Some((*cursor, *layout_index)),
            _ => None,
        })
        .collect()
}

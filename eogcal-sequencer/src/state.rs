use super::config::{AudioRoute, BeepMode, SequencerConfig};
use super::cue::{CuePlayer, SilentCuePlayer};
use super::event::SequencerEvent;
use super::run::RunState;
use eogcal_core::{Marker, SequencerState, TargetLayout, TargetOrder};
use eogcal_sync::{AudioCue, RemoteCommand, SyncChannels, TriggerCode};
use eogcal_timing::Timer;
use log::{debug, info, warn};
use std::time::Duration;

/// Drives one calibration run from elapsed time alone.
///
/// Every pause pre-announces the target that follows it: trigger, remote
/// event and verbal command go out when the pause begins, the marker only
/// appears when it ends. Downstream recorders rely on seeing the signal
/// before the visual change.
///
/// Commands and `update` take `&mut self`, so the owner serializes them on
/// one timeline.
pub struct CalibrationSequencer<T, M>
where
    T: Timer,
    M: Marker,
{
    timer: T,
    marker: M,
    config: SequencerConfig,
    layout: TargetLayout,
    order: TargetOrder,
    channels: SyncChannels,
    cues: Box<dyn CuePlayer>,
    run: RunState,
    use_reference: bool,
    events: Vec<SequencerEvent>,
}

impl<T, M> CalibrationSequencer<T, M>
where
    T: Timer,
    M: Marker,
{
    pub fn new(config: SequencerConfig, order: TargetOrder, timer: T, marker: M) -> Self {
        let use_reference = config.use_reference && order.reference().is_some();
        Self {
            timer,
            marker,
            config,
            layout: TargetLayout::default(),
            order,
            channels: SyncChannels::disabled(),
            cues: Box::new(SilentCuePlayer),
            run: RunState::default(),
            use_reference,
            events: Vec::new(),
        }
    }

    pub fn with_channels(mut self, channels: SyncChannels) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_cue_player(mut self, cues: impl CuePlayer + 'static) -> Self {
        self.cues = Box::new(cues);
        self
    }

    pub fn with_display_size(mut self, width: f32, height: f32) -> Self {
        self.resize_pattern(width, height);
        self
    }

    pub fn start_calibration(&mut self) {
        if !self.run.state.is_off() || self.run.recording {
            warn!("start ignored: calibration already running");
            return;
        }

        let now = self.timer.now();
        self.channels.start_recording();
        self.run.recording = true;
        self.run.cursor = None;
        self.run.state = if self.use_reference {
            SequencerState::Reference
        } else {
            SequencerState::Target
        };
        info!(
            "Calibration started at {:.3} s: {} targets, reference {:?}",
            now.as_secs_f64(),
            self.order.len(),
            self.order.reference().filter(|_| self.use_reference),
        );
        self.events.push(SequencerEvent::Started);

        self.pause(now);
        self.run.target_started_at = Some(now);
    }

    /// Ends the run from any state. Safe to call repeatedly; only the first
    /// call after a run sends the stop signal.
    pub fn stop_calibration(&mut self) {
        self.hide_marker();

        if self.run.state.is_off() && !self.run.recording {
            debug!("stop ignored: calibration not running");
            return;
        }

        self.channels.stop_recording();
        self.run = RunState::default();
        info!(
            "Calibration stopped at {:.3} s",
            self.timer.now().as_secs_f64()
        );
        self.events.push(SequencerEvent::Stopped);
    }

    /// Running means the recording channel is active, including pauses.
    pub fn is_running(&self) -> bool {
        self.run.recording
    }

    /// Recomputes the layout and moves the visible marker to the new
    /// coordinates of the same target. No state change, no signals.
    pub fn resize_pattern(&mut self, width: f32, height: f32) {
        self.layout = TargetLayout::compute(width, height);
        if let Some(index) = self.current_layout_index() {
            self.place_marker(index);
        }
        debug!("Pattern resized to {}x{}", width, height);
    }

    /// Advances the state machine by at most one transition and returns
    /// everything that happened since the last call.
    pub fn update(&mut self) -> Vec<SequencerEvent> {
        if !self.run.state.is_off() {
            let now = self.timer.now();
            self.step(now);
        }
        std::mem::take(&mut self.events)
    }

    fn step(&mut self, now: Duration) {
        if self.run.cursor.is_some_and(|c| c >= self.order.len()) {
            self.complete();
            return;
        }

        match self.run.state {
            SequencerState::Target | SequencerState::Reference => {
                let started = self.run.target_started_at.unwrap_or(now);
                if self.run.pause_started_at.is_none()
                    && now.saturating_sub(started) >= self.config.target_duration
                {
                    self.hide_marker();
                    if self.config.beep == BeepMode::OnEnd {
                        self.beep();
                    }
                    self.pause(now);
                }
            }
            SequencerState::Pause2Reference | SequencerState::Pause2Target => {
                let Some(paused) = self.run.pause_started_at else {
                    return;
                };
                if now.saturating_sub(paused) >= self.config.pause_duration {
                    self.run.pause_started_at = None;
                    if self.run.state == SequencerState::Pause2Reference {
                        self.back_to_reference(now);
                    } else {
                        self.next_target(now);
                    }
                }
            }
            SequencerState::Off => {}
        }
    }

    fn pause(&mut self, now: Duration) {
        if self.run.pause_started_at.is_some() {
            return;
        }
        let Some(next) = self.run.state.pause_after(self.use_reference) else {
            return;
        };

        self.run.state = next;
        self.run.pause_started_at = Some(now);
        debug!("{:?} at {:.3} s", next, now.as_secs_f64());
        self.events.push(SequencerEvent::PauseBegan(next));
        self.announce_upcoming();
    }

    fn announce_upcoming(&mut self) {
        match self.run.state {
            SequencerState::Pause2Reference => {
                let Some(reference) = self.order.reference() else {
                    return;
                };
                let clip = self.order.reference_clip().map(str::to_owned);
                self.channels.trigger(TriggerCode::Reference(reference));
                self.channels.remote(RemoteCommand::Event {
                    name: "reference".into(),
                    value: reference as i32,
                });
                self.verbal_command(reference, clip);
            }
            SequencerState::Pause2Target => {
                let cursor = self.next_cursor();
                // nothing to announce after the last target
                let Some(layout_index) = self.order.layout_index(cursor) else {
                    return;
                };
                let clip = self.order.clip(cursor).map(str::to_owned);
                self.channels.trigger(TriggerCode::Target(cursor));
                self.channels.remote(RemoteCommand::Event {
                    name: "target".into(),
                    value: cursor as i32,
                });
                self.verbal_command(layout_index, clip);
            }
            _ => {}
        }
    }

    fn next_target(&mut self, now: Duration) {
        let cursor = self.next_cursor();
        self.run.cursor = Some(cursor);
        let Some(layout_index) = self.order.layout_index(cursor) else {
            self.complete();
            return;
        };

        self.run.state = SequencerState::Target;
        self.run.target_started_at = Some(now);
        self.show_marker(Some(cursor), layout_index, now);
    }

    fn back_to_reference(&mut self, now: Duration) {
        let Some(reference) = self.order.reference() else {
            self.next_target(now);
            return;
        };

        self.run.state = SequencerState::Reference;
        self.run.target_started_at = Some(now);
        self.show_marker(None, reference, now);
    }

    fn complete(&mut self) {
        info!("Calibration complete: all {} targets shown", self.order.len());
        self.events.push(SequencerEvent::Completed);
        self.stop_calibration();
    }

    fn show_marker(&mut self, cursor: Option<usize>, layout_index: usize, now: Duration) {
        self.place_marker(layout_index);
        self.marker.set_visible(true);
        debug!(
            "Showing target {:?} (layout {}) at {:.3} s",
            cursor,
            layout_index,
            now.as_secs_f64()
        );
        self.events.push(SequencerEvent::Shown {
            cursor,
            layout_index,
        });
        if self.config.beep == BeepMode::OnStart {
            self.beep();
        }
    }

    fn hide_marker(&mut self) {
        if self.marker.is_visible() {
            self.marker.set_visible(false);
            self.events.push(SequencerEvent::Hidden);
        }
    }

    fn place_marker(&mut self, layout_index: usize) {
        if let Some(position) = self.layout.placement(layout_index, self.config.style.radius) {
            self.marker.set_position(position);
        }
    }

    fn beep(&mut self) {
        self.channels.trigger(TriggerCode::Beep);
        match self.config.audio_route {
            AudioRoute::Remote => self.channels.audio_cue(AudioCue::Beep),
            AudioRoute::Local => {
                if let Err(e) = self.cues.beep() {
                    warn!("beep failed: {e:#}");
                }
            }
        }
    }

    fn verbal_command(&mut self, layout_index: usize, clip: Option<String>) {
        if !self.config.use_verbal_commands {
            return;
        }
        match self.config.audio_route {
            AudioRoute::Remote => self.channels.audio_cue(AudioCue::Target(layout_index)),
            AudioRoute::Local => {
                if let Some(clip) = clip {
                    if let Err(e) = self.cues.play_clip(&clip) {
                        warn!("verbal command `{clip}` failed: {e:#}");
                    }
                }
            }
        }
    }

    fn next_cursor(&self) -> usize {
        self.run.cursor.map_or(0, |c| c + 1)
    }

    fn current_layout_index(&self) -> Option<usize> {
        match self.run.state {
            SequencerState::Target => self.run.cursor.and_then(|c| self.order.layout_index(c)),
            SequencerState::Reference => self.order.reference(),
            _ => None,
        }
    }

    /// Selects experiment and subject on the eye tracker.
    pub fn setup_remote(&mut self, experiment: &str, subject: &str) {
        self.channels
            .remote(RemoteCommand::SelectExperiment(experiment.to_string()));
        self.channels
            .remote(RemoteCommand::SelectSubject(subject.to_string()));
    }

    pub fn connect_remote(&mut self) {
        self.channels.remote(RemoteCommand::Connect);
    }

    pub fn disconnect_remote(&mut self) {
        self.channels.remote(RemoteCommand::Disconnect);
    }

    pub fn start_streaming(&mut self) {
        self.channels.remote(RemoteCommand::StartStreaming);
    }

    pub fn stop_streaming(&mut self) {
        self.channels.remote(RemoteCommand::StopStreaming);
    }

    pub fn request_calibration(&mut self) {
        self.channels.remote(RemoteCommand::Calibrate);
    }

    pub fn start_remote_recording(&mut self) {
        self.channels.remote(RemoteCommand::StartRecording);
    }

    pub fn stop_remote_recording(&mut self) {
        self.channels.remote(RemoteCommand::StopRecording);
    }

    pub fn send_remote_event(&mut self, name: &str, value: i32) {
        self.channels.remote(RemoteCommand::Event {
            name: name.to_string(),
            value,
        });
    }

    pub fn state(&self) -> SequencerState {
        self.run.state
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn layout(&self) -> &TargetLayout {
        &self.layout
    }

    pub fn order(&self) -> &TargetOrder {
        &self.order
    }

    pub fn uses_reference(&self) -> bool {
        self.use_reference
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    pub fn marker_mut(&mut self) -> &mut M {
        &mut self.marker
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

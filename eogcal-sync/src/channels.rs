use crate::audio::{AudioCue, RemoteAudio};
use crate::error::SyncError;
use crate::remote::{RemoteCommand, RemoteControl};
use crate::trigger::{TriggerChannel, TriggerCode};
use log::{debug, warn};
use std::fmt::Display;

/// The three outbound channels, each optional.
///
/// Every helper is fire-and-forget: failures are logged and dropped so a
/// dead peer never holds up the caller.
#[derive(Default)]
pub struct SyncChannels {
    trigger: Option<Box<dyn TriggerChannel>>,
    remote: Option<Box<dyn RemoteControl>>,
    audio: Option<Box<dyn RemoteAudio>>,
}

impl SyncChannels {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_trigger(mut self, trigger: impl TriggerChannel + 'static) -> Self {
        self.trigger = Some(Box::new(trigger));
        self
    }

    pub fn with_remote(mut self, remote: impl RemoteControl + 'static) -> Self {
        self.remote = Some(Box::new(remote));
        self
    }

    pub fn with_audio(mut self, audio: impl RemoteAudio + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn has_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn start_recording(&mut self) {
        if let Some(trigger) = self.trigger.as_mut() {
            report("trigger", "start", trigger.start_recording());
        }
    }

    pub fn stop_recording(&mut self) {
        if let Some(trigger) = self.trigger.as_mut() {
            report("trigger", "stop", trigger.stop_recording());
        }
    }

    pub fn trigger(&mut self, code: TriggerCode) {
        if let Some(trigger) = self.trigger.as_mut() {
            report("trigger", code, trigger.send_trigger(code));
        }
    }

    pub fn remote(&mut self, command: RemoteCommand) {
        if let Some(remote) = self.remote.as_mut() {
            let result = remote.send(&command);
            report("remote control", command, result);
        }
    }

    pub fn audio_cue(&mut self, cue: AudioCue) {
        if let Some(audio) = self.audio.as_mut() {
            report("remote audio", cue, audio.play_cue(cue));
        }
    }
}

fn report(channel: &str, what: impl Display, result: Result<(), SyncError>) {
    match result {
        Ok(()) => debug!("{channel}: sent {what}"),
        Err(e) => warn!("{channel}: dropped {what}: {e}"),
    }
}

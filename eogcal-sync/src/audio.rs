use crate::error::SyncError;
use crate::link::UdpLink;
use crate::trigger::BEEP_CODE;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Verbal command for the target at this layout index.
    Target(usize),
    Beep,
}

impl AudioCue {
    pub fn value(&self) -> u32 {
        match self {
            AudioCue::Target(n) => *n as u32,
            AudioCue::Beep => BEEP_CODE,
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioCue::Target(n) => write!(f, "cue {n}"),
            AudioCue::Beep => f.write_str("beep"),
        }
    }
}

/// Cue playback on remote audio hardware.
pub trait RemoteAudio {
    fn play_cue(&mut self, cue: AudioCue) -> Result<(), SyncError>;
}

#[derive(Debug)]
pub struct UdpRemoteAudio {
    link: UdpLink,
}

impl UdpRemoteAudio {
    pub fn open(address: &str) -> Result<Self, SyncError> {
        Ok(Self {
            link: UdpLink::open("remote audio", address)?,
        })
    }
}

impl RemoteAudio for UdpRemoteAudio {
    fn play_cue(&mut self, cue: AudioCue) -> Result<(), SyncError> {
        self.link.send(cue.value().to_string().as_bytes())
    }
}

//! Fire-and-forget synchronization channels.
//!
//! Three independent outbound paths tell the outside world what the
//! calibration is doing: a trigger datagram for the physiological recorder,
//! an OSC remote-control link to the eye tracker and a remote-audio
//! datagram for cue hardware. None of them waits for an answer.

pub mod audio;
pub mod channels;
pub mod error;
pub mod link;
pub mod osc;
pub mod remote;
pub mod trigger;

pub use audio::{AudioCue, RemoteAudio, UdpRemoteAudio};
pub use channels::SyncChannels;
pub use error::SyncError;
pub use link::UdpLink;
pub use osc::OscArg;
pub use remote::{OscRemoteControl, RemoteCommand, RemoteControl};
pub use trigger::{BEEP_CODE, TriggerChannel, TriggerCode, UdpTrigger};

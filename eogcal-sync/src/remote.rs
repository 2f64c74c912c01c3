use crate::error::SyncError;
use crate::link::UdpLink;
use crate::osc::{OscArg, encode_message};
use std::fmt;

/// Commands understood by the eye tracker's remote-control interface.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    SelectExperiment(String),
    SelectSubject(String),
    Connect,
    Disconnect,
    StartStreaming,
    StopStreaming,
    StartRecording,
    StopRecording,
    Calibrate,
    Event { name: String, value: i32 },
}

impl RemoteCommand {
    pub fn verb(&self) -> &'static str {
        match self {
            RemoteCommand::SelectExperiment(_) => "experiment",
            RemoteCommand::SelectSubject(_) => "subject",
            RemoteCommand::Connect => "connect",
            RemoteCommand::Disconnect => "disconnect",
            RemoteCommand::StartStreaming => "stream_start",
            RemoteCommand::StopStreaming => "stream_stop",
            RemoteCommand::StartRecording => "record_start",
            RemoteCommand::StopRecording => "record_stop",
            RemoteCommand::Calibrate => "calibrate",
            RemoteCommand::Event { .. } => "event",
        }
    }

    pub fn args(&self) -> Vec<OscArg> {
        let mut args = vec![OscArg::Str(self.verb().to_string())];
        match self {
            RemoteCommand::SelectExperiment(s) | RemoteCommand::SelectSubject(s) => {
                args.push(OscArg::Str(s.clone()))
            }
            RemoteCommand::Event { name, value } => {
                args.push(OscArg::Str(name.clone()));
                args.push(OscArg::Int(*value));
            }
            _ => {}
        }
        args
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCommand::SelectExperiment(s) | RemoteCommand::SelectSubject(s) => {
                write!(f, "{} `{s}`", self.verb())
            }
            RemoteCommand::Event { name, value } => write!(f, "event {name}={value}"),
            _ => f.write_str(self.verb()),
        }
    }
}

pub trait RemoteControl {
    fn send(&mut self, command: &RemoteCommand) -> Result<(), SyncError>;
}

/// Remote control over OSC: `<address> ,s[si] verb [payload...]`.
#[derive(Debug)]
pub struct OscRemoteControl {
    link: UdpLink,
    address: String,
}

impl OscRemoteControl {
    pub fn open(peer: &str, address: impl Into<String>) -> Result<Self, SyncError> {
        Ok(Self {
            link: UdpLink::open("remote control", peer)?,
            address: address.into(),
        })
    }
}

impl RemoteControl for OscRemoteControl {
    fn send(&mut self, command: &RemoteCommand) -> Result<(), SyncError> {
        self.link
            .send(&encode_message(&self.address, &command.args()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::tests::{receiver, recv};

    #[test]
    fn sends_one_osc_message_per_command() {
        let (rx, peer) = receiver();
        let mut remote = OscRemoteControl::open(&peer, "/et").unwrap();

        remote.send(&RemoteCommand::Connect).unwrap();
        remote
            .send(&RemoteCommand::SelectSubject("p01".into()))
            .unwrap();

        assert_eq!(recv(&rx), encode_message("/et", &[OscArg::Str("connect".into())]));
        assert_eq!(
            recv(&rx),
            encode_message(
                "/et",
                &[OscArg::Str("subject".into()), OscArg::Str("p01".into())]
            )
        );
    }

    #[test]
    fn event_carries_name_and_value() {
        let cmd = RemoteCommand::Event {
            name: "target".into(),
            value: 3,
        };
        assert_eq!(
            cmd.args(),
            vec![
                OscArg::Str("event".into()),
                OscArg::Str("target".into()),
                OscArg::Int(3)
            ]
        );
        assert_eq!(cmd.to_string(), "event target=3");
        assert_eq!(RemoteCommand::StopStreaming.args().len(), 1);
    }
}

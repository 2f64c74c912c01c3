use crate::error::SyncError;
use crate::link::UdpLink;
use std::fmt;

/// Reserved identifier meaning "generic beep event".
pub const BEEP_CODE: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCode {
    /// Position of a sequence target in the presentation order.
    Target(usize),
    /// Layout index of the reference target.
    Reference(usize),
    Beep,
}

impl TriggerCode {
    pub fn value(&self) -> u32 {
        match self {
            TriggerCode::Target(n) | TriggerCode::Reference(n) => *n as u32,
            TriggerCode::Beep => BEEP_CODE,
        }
    }
}

impl fmt::Display for TriggerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerCode::Target(n) => write!(f, "target {n}"),
            TriggerCode::Reference(n) => write!(f, "reference {n}"),
            TriggerCode::Beep => write!(f, "beep"),
        }
    }
}

/// Trigger path to the physiological recording device.
pub trait TriggerChannel {
    fn start_recording(&mut self) -> Result<(), SyncError>;
    fn stop_recording(&mut self) -> Result<(), SyncError>;
    fn send_trigger(&mut self, code: TriggerCode) -> Result<(), SyncError>;
}

/// ASCII trigger datagrams: the decimal code, `start` or `stop`.
#[derive(Debug)]
pub struct UdpTrigger {
    link: UdpLink,
}

impl UdpTrigger {
    pub fn open(address: &str) -> Result<Self, SyncError> {
        Ok(Self {
            link: UdpLink::open("trigger", address)?,
        })
    }
}

impl TriggerChannel for UdpTrigger {
    fn start_recording(&mut self) -> Result<(), SyncError> {
        self.link.send(b"start")
    }

    fn stop_recording(&mut self) -> Result<(), SyncError> {
        self.link.send(b"stop")
    }

    fn send_trigger(&mut self, code: TriggerCode) -> Result<(), SyncError> {
        self.link.send(code.value().to_string().as_bytes())
    }
}

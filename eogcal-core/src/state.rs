/// Where the calibration sequencer currently is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SequencerState {
    #[default]
    Off,
    Target,
    Pause2Reference,
    Reference,
    Pause2Target,
}

impl SequencerState {
    /// A marker is on screen in this state.
    pub fn is_presenting(&self) -> bool {
        matches!(self, Self::Target | Self::Reference)
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Self::Pause2Reference | Self::Pause2Target)
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }

    /// The pause that follows this presentation state.
    pub fn pause_after(&self, use_reference: bool) -> Option<Self> {
        use SequencerState::*;
        Some(match self {
            Target if use_reference => Pause2Reference,
            Target | Reference => Pause2Target,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_alternate_only_with_reference() {
        use SequencerState::*;
        assert_eq!(Target.pause_after(true), Some(Pause2Reference));
        assert_eq!(Target.pause_after(false), Some(Pause2Target));
        assert_eq!(Reference.pause_after(true), Some(Pause2Target));
        assert_eq!(Off.pause_after(true), None);
        assert_eq!(Pause2Target.pause_after(true), None);
    }
}

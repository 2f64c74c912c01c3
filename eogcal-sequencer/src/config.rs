use eogcal_core::{ConfigError, MarkerStyle};
use std::time::Duration;

/// When a beep accompanies a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeepMode {
    #[default]
    Off,
    /// Beep as the marker appears.
    OnStart,
    /// Beep as the marker disappears.
    OnEnd,
}

impl BeepMode {
    /// `always` wins over `once`.
    pub fn from_flags(once: bool, always: bool) -> Self {
        match (once, always) {
            (_, true) => BeepMode::OnEnd,
            (true, false) => BeepMode::OnStart,
            (false, false) => BeepMode::Off,
        }
    }
}

/// Where beeps and verbal commands are played. The two paths never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioRoute {
    #[default]
    Local,
    Remote,
}

impl AudioRoute {
    pub fn from_flag(use_remote_sound: bool) -> Self {
        if use_remote_sound {
            AudioRoute::Remote
        } else {
            AudioRoute::Local
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequencerConfig {
    pub target_duration: Duration,
    pub pause_duration: Duration,
    pub style: MarkerStyle,
    pub beep: BeepMode,
    pub audio_route: AudioRoute,
    pub use_verbal_commands: bool,
    pub use_reference: bool,
}

impl SequencerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.style.radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(self.style.radius));
        }
        Ok(())
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            target_duration: Duration::from_secs(2),
            pause_duration: Duration::from_millis(250),
            style: MarkerStyle::default(),
            beep: BeepMode::OnStart,
            audio_route: AudioRoute::Local,
            use_verbal_commands: false,
            use_reference: true,
        }
    }
}

/// Converts a settings value in seconds, rejecting negatives, NaN and
/// anything too large for a `Duration`.
pub fn seconds(name: &'static str, value: f32) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f32(value).map_err(|_| ConfigError::InvalidDuration { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beep_mode_from_flags() {
        assert_eq!(BeepMode::from_flags(false, false), BeepMode::Off);
        assert_eq!(BeepMode::from_flags(true, false), BeepMode::OnStart);
        assert_eq!(BeepMode::from_flags(false, true), BeepMode::OnEnd);
        assert_eq!(BeepMode::from_flags(true, true), BeepMode::OnEnd);
    }

    #[test]
    fn radius_must_be_positive() {
        let mut config = SequencerConfig::default();
        assert!(config.validate().is_ok());
        config.style.radius = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveRadius(0.0)));
        config.style.radius = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn seconds_rejects_negative_values() {
        assert_eq!(seconds("pause", 0.25), Ok(Duration::from_millis(250)));
        assert_eq!(seconds("pause", 0.0), Ok(Duration::ZERO));
        assert!(seconds("duration", -1.0).is_err());
        assert!(seconds("duration", f32::INFINITY).is_err());
        assert!(seconds("duration", f32::NAN).is_err());
        assert_eq!(
            seconds("duration", 1e20),
            Err(ConfigError::InvalidDuration {
                name: "duration",
                value: 1e20
            })
        );
    }
}

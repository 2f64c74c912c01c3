use thiserror::Error;

/// Problems found while turning settings into a runnable calibration.
///
/// All of these are detected once at load time; a sequencer is never
/// constructed from a configuration that produced one.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("order entry {position} points at layout index {index}, but the layout has {count} targets")]
    LayoutIndexOutOfRange {
        position: usize,
        index: usize,
        count: usize,
    },
    #[error("reference index {index} is outside the layout (0..{count})")]
    ReferenceOutOfRange { index: usize, count: usize },
    #[error("target order is empty")]
    EmptyOrder,
    #[error("marker radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("{name} must be a non-negative number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f32 },
    #[error("invalid {channel} address `{address}`")]
    InvalidAddress {
        channel: &'static str,
        address: String,
    },
}

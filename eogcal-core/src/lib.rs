pub mod error;
pub mod layout;
pub mod marker;
pub mod order;
pub mod pattern;
pub mod state;

pub use error::ConfigError;
pub use layout::{Point, TARGET_COUNT, TargetLayout};
pub use marker::{Marker, MarkerStyle};
pub use order::{OrderEntry, TargetOrder};
pub use pattern::{Pattern, default_clip, fill_default_clips};
pub use state::SequencerState;

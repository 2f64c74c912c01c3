pub mod render;

pub use render::{FrameStats, MarkerRenderer};

pub mod timer;

pub use timer::{FrameStats, HighPrecisionTimer, MAX_FRAME_SAMPLES, ManualTimer, Timer};

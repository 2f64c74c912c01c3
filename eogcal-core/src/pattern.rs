use crate::order::OrderEntry;
use serde::{Deserialize, Serialize};

/// Verbal command recorded for each of the centre and compass targets.
/// Quadrant targets have none.
const COMMANDS: [&str; 9] = [
    "center.wav",
    "up_left.wav",
    "up.wav",
    "up_right.wav",
    "right.wav",
    "down_right.wav",
    "down.wav",
    "down_left.wav",
    "left.wav",
];

pub fn default_clip(layout_index: usize) -> Option<&'static str> {
    COMMANDS.get(layout_index).copied()
}

/// Gives every entry without a clip the stock command for its target.
pub fn fill_default_clips(entries: &mut [OrderEntry]) {
    for entry in entries.iter_mut().filter(|e| e.clip.is_none()) {
        entry.clip = default_clip(entry.layout_index).map(str::to_owned);
    }
}

/// Named sweeps over the centre and compass targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Centre, then clockwise from top-left.
    Cw,
    /// Counter-clockwise from left back to centre.
    Ccw,
    /// Out-and-back saccades through the centre.
    Rand,
}

impl Pattern {
    pub fn layout_indices(self) -> &'static [usize] {
        match self {
            Pattern::Cw => &[0, 1, 2, 3, 4, 5, 6, 7, 8],
            Pattern::Ccw => &[8, 7, 6, 5, 4, 3, 2, 1, 0],
            Pattern::Rand => &[0, 1, 5, 1, 0, 2, 6, 2, 0, 4, 8, 4, 0, 7, 3, 7, 0],
        }
    }

    /// Concatenates `patterns` into order entries carrying their commands.
    pub fn expand(patterns: &[Pattern]) -> Vec<OrderEntry> {
        patterns
            .iter()
            .flat_map(|p| p.layout_indices())
            .map(|&n| match default_clip(n) {
                Some(clip) => OrderEntry::with_clip(n, clip),
                None => OrderEntry::new(n),
            })
            .collect()
    }
}

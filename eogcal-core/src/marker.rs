use crate::layout::Point;

/// Something that draws the fixation marker.
///
/// The sequencer only moves and toggles it; redrawing every frame is the
/// implementor's business.
pub trait Marker {
    fn set_position(&mut self, position: Point);
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub foreground: [u8; 4],
    pub background: [u8; 4],
    /// Alternation frequency of the two colours, 0 keeps it steady.
    pub blink_hz: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 12.0,
            foreground: [128, 0, 128, 255],
            background: [0, 0, 0, 255],
            blink_hz: 2.0,
        }
    }
}

/// Number of canonical targets in the calibration pattern.
pub const TARGET_COUNT: usize = 13;

pub type Point = (f32, f32);

// Marker offsets in units of marker radius, keeping edge and corner
// targets fully on screen.
const CORRECTIONS: [Point; TARGET_COUNT] = [
    (-1.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (-2.0, 1.0),
    (-2.0, -1.0),
    (-2.0, -2.0),
    (-1.0, -2.0),
    (1.0, -2.0),
    (1.0, -1.0),
    (-0.5, -0.5),
    (-1.5, -0.5),
    (-1.5, -1.5),
    (-0.5, -1.5),
];

/// Canonical target positions for a display of a given size.
///
/// ```text
///  1    2    3
///     9   10
///  8    0    4
///    12   11
///  7    6    5
/// ```
///
/// The meaning of an index never changes between recomputations, only the
/// absolute coordinate it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLayout {
    width: f32,
    height: f32,
    positions: [Point; TARGET_COUNT],
    corrections: [Point; TARGET_COUNT],
}

impl TargetLayout {
    pub fn compute(width: f32, height: f32) -> Self {
        let (w, h) = (width.max(0.0), height.max(0.0));
        let positions = [
            (w / 2.0, h / 2.0),
            (0.0, 0.0),
            (w / 2.0, 0.0),
            (w, 0.0),
            (w, h / 2.0),
            (w, h),
            (w / 2.0, h),
            (0.0, h),
            (0.0, h / 2.0),
            (w / 4.0, h / 4.0),
            (w * 3.0 / 4.0, h / 4.0),
            (w * 3.0 / 4.0, h * 3.0 / 4.0),
            (w / 4.0, h * 3.0 / 4.0),
        ];

        Self {
            width: w,
            height: h,
            positions,
            corrections: CORRECTIONS,
        }
    }

    pub fn len(&self) -> usize {
        TARGET_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn corrections(&self) -> &[Point] {
        &self.corrections
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    pub fn correction(&self, index: usize) -> Option<Point> {
        self.corrections.get(index).copied()
    }

    /// Absolute anchor of a marker of `radius` drawn for target `index`.
    pub fn placement(&self, index: usize, radius: f32) -> Option<Point> {
        let (x, y) = self.position(index)?;
        let (cx, cy) = self.correction(index)?;
        Some((
            x + cx * radius + radius / 2.0,
            y + cy * radius + radius / 2.0,
        ))
    }
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self::compute(0.0, 0.0)
    }
}

use crate::point::{EPSILON, Point};

/// Bounding box ID for the left side (X-Min), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_LEFT: i32 = -1;
/// Bounding box ID for the right side (X-Max), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_RIGHT: i32 = -2;
/// Bounding box ID for the bottom side (Y-Min), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_BOTTOM: i32 = -3;
/// Bounding box ID for the top side (Y-Max), it is negative to prevent conflicts with site IDs.
pub const BOX_ID_TOP: i32 = -4;

/// Half-width of the extent used when the caller does not supply one.
pub const NULL_EXTENT: f64 = 1e6;

/// Axis-aligned clipping rectangle `[[x0, y0], [x1, y1]]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// The very large square standing in for "unbounded".
    pub fn null() -> Self {
        Self::new([-NULL_EXTENT, -NULL_EXTENT], [NULL_EXTENT, NULL_EXTENT])
    }

    pub fn is_null(&self) -> bool {
        *self == Self::null()
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Closed containment test, boundary included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min[0] && x <= self.max[0] && y >= self.min[1] && y <= self.max[1]
    }

    /// Whether `p` lies on one of the four sides, within `EPSILON`.
    pub fn on_boundary(&self, p: &Point) -> bool {
        let near = |v: f64, bound: f64| (v - bound).abs() < EPSILON;
        let within = |v: f64, axis: usize| v > self.min[axis] - EPSILON && v < self.max[axis] + EPSILON;
        ((near(p.x, self.min[0]) || near(p.x, self.max[0])) && within(p.y, 1))
            || ((near(p.y, self.min[1]) || near(p.y, self.max[1])) && within(p.x, 0))
    }

    /// Identifies the rectangle side a boundary segment runs along.
    ///
    /// Returns `None` when the segment does not lie on any side.
    pub fn side_of(&self, a: &Point, b: &Point) -> Option<i32> {
        let on = |va: f64, vb: f64, bound: f64| (va - bound).abs() < EPSILON && (vb - bound).abs() < EPSILON;
        if on(a.x, b.x, self.min[0]) {
            Some(box_side(0, false))
        } else if on(a.x, b.x, self.max[0]) {
            Some(box_side(0, true))
        } else if on(a.y, b.y, self.min[1]) {
            Some(box_side(1, false))
        } else if on(a.y, b.y, self.max[1]) {
            Some(box_side(1, true))
        } else {
            None
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::null()
    }
}

/// Calculates the ID for a bounding box side based on the axis and direction.
///
/// The IDs start at -1 and decrease.
/// - Axis 0 (X) Min: -1
/// - Axis 0 (X) Max: -2
/// - Axis 1 (Y) Min: -3
/// - Axis 1 (Y) Max: -4
pub fn box_side(axis: usize, is_max: bool) -> i32 {
    -1 - (axis * 2 + if is_max { 1 } else { 0 }) as i32
}

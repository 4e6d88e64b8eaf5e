/// Absolute tolerance for coordinate comparisons.
pub const EPSILON: f64 = 1e-6;
/// Squared tolerance, used for determinant tests.
pub const EPSILON2: f64 = 1e-12;

/// A position in the plane, used for Voronoi vertices and clipped edge endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Checks whether both coordinates are within `EPSILON` of `other`.
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An input generator with its index into the caller's input order.
///
/// Sites are compared by `i`: two arcs belong to the same site exactly when their
/// indices match, regardless of coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub x: f64,
    pub y: f64,
    pub i: usize,
}

impl Site {
    pub const fn new(x: f64, y: f64, i: usize) -> Self {
        Self { x, y, i }
    }

    /// Builds sites from raw coordinates, using the position as index.
    pub fn from_points(points: &[[f64; 2]]) -> Vec<Site> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| Site::new(p[0], p[1], i))
            .collect()
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Rounds a coordinate onto the `EPSILON` grid.
pub fn snap(v: f64) -> f64 {
    (v / EPSILON).round() * EPSILON
}

/// Twice the signed area of the triangle `(a, b, c)`, negative for the winding
/// produced by walking a cell's half-edges in descending angle order.
pub fn triangle_area(a: &Site, b: &Site, c: &Site) -> f64 {
    (a.x - c.x) * (b.y - a.y) - (a.x - b.x) * (c.y - a.y)
}

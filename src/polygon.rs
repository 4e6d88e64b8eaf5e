use crate::bounds::BoundingBox;
use crate::bounds::box_side;

/// A closed Voronoi cell outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub(crate) id: usize,
    // Flat array of vertices [x, y, x, y, ...], clockwise
    pub(crate) vertices: Vec<f64>,
    // Neighbor ID for each edge. edge_neighbors[i] corresponds to edge starting at vertices[2*i]
    pub(crate) edge_neighbors: Vec<i32>,
}

impl Polygon {
    pub fn new(id: usize, vertices: Vec<f64>, edge_neighbors: Vec<i32>) -> Polygon {
        debug_assert_eq!(vertices.len(), edge_neighbors.len() * 2);
        Polygon {
            id,
            vertices,
            edge_neighbors,
        }
    }

    /// The polygon covering the whole rectangle, used for a lone site.
    pub fn from_bounds(id: usize, bounds: &BoundingBox) -> Polygon {
        let vertices = vec![
            bounds.min[0], bounds.max[1], // 0: Top-Left
            bounds.max[0], bounds.max[1], // 1: Top-Right
            bounds.max[0], bounds.min[1], // 2: Bottom-Right
            bounds.min[0], bounds.min[1], // 3: Bottom-Left
        ];

        let edge_neighbors = vec![
            box_side(1, true),  // 0->1 (Top / Y-Max)
            box_side(0, true),  // 1->2 (Right / X-Max)
            box_side(1, false), // 2->3 (Bottom / Y-Min)
            box_side(0, false), // 3->0 (Left / X-Min)
        ];

        Polygon {
            id,
            vertices,
            edge_neighbors,
        }
    }

    /// An empty outline for sites that own no area.
    pub fn empty(id: usize) -> Polygon {
        Polygon {
            id,
            ..Default::default()
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vertices(&self) -> Vec<f64> {
        self.vertices.clone()
    }

    pub fn edge_neighbors(&self) -> Vec<i32> {
        self.edge_neighbors.clone()
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.vertices.chunks_exact(2).map(|p| [p[0], p[1]])
    }

    pub fn len(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len() / 2;
        if n < 3 { return 0.0; }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];
            area += xi * yj - xj * yi;
        }
        (area * 0.5).abs()
    }

    /// Area-weighted centroid, `None` for degenerate outlines.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        let n = self.vertices.len() / 2;
        if n < 3 { return None; }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];

            let cross = xi * yj - xj * yi;
            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
        }

        if area.abs() < 1e-12 {
            return None;
        }

        let factor = 1.0 / (3.0 * area);
        Some([cx * factor, cy * factor])
    }

    /// Point-in-polygon test by ray casting, boundary handling unspecified.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let n = self.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let (xi, yi) = (self.vertices[i * 2], self.vertices[i * 2 + 1]);
            let (xj, yj) = (self.vertices[j * 2], self.vertices[j * 2 + 1]);
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BOX_ID_LEFT, BOX_ID_TOP};

    #[test]
    fn test_polygon_box() {
        let bounds = BoundingBox::new([0.0, 0.0], [1.0, 1.0]);
        let polygon = Polygon::from_bounds(0, &bounds);

        assert!((polygon.area() - 1.0).abs() < 1e-6);
        let c = polygon.centroid().unwrap();
        assert!((c[0] - 0.5).abs() < 1e-6);
        assert!((c[1] - 0.5).abs() < 1e-6);
        assert_eq!(polygon.edge_neighbors[0], BOX_ID_TOP);
        assert_eq!(polygon.edge_neighbors[3], BOX_ID_LEFT);
    }

    #[test]
    fn test_polygon_contains() {
        let polygon = Polygon::new(3, vec![0.0, 0.0, 0.0, 2.0, 2.0, 0.0], vec![0, 1, 2]);
        assert!(polygon.contains(0.5, 0.5));
        assert!(!polygon.contains(1.5, 1.5));
        assert_eq!(polygon.id(), 3);
    }

    #[test]
    fn test_empty_polygon() {
        let polygon = Polygon::empty(7);
        assert!(polygon.is_empty());
        assert_eq!(polygon.area(), 0.0);
        assert_eq!(polygon.centroid(), None);
    }
}

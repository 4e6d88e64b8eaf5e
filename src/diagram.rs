use rayon::prelude::*;

use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::edge::Edge;
use crate::point::triangle_area;
use crate::polygon::Polygon;

/// A pair of sites sharing a Voronoi edge, i.e. an edge of the Delaunay triangulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

/// Side id of a border edge. The cell closer only lays border edges between
/// two points of the same side, so every border edge maps onto one.
fn border_side(edge: &Edge, bounds: &BoundingBox) -> i32 {
    edge.a
        .zip(edge.b)
        .and_then(|(a, b)| bounds.side_of(&a, &b))
        .expect("border edge lies on a side of the extent")
}

/// Raw output of a sweep: one cell per site and every surviving edge.
#[derive(Clone, Debug, Default)]
pub struct Diagram {
    pub cells: Vec<Cell>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Converts each cell's ring into a polygon.
    ///
    /// The diagram must have been clipped to `bounds`. A cell without a ring
    /// becomes the whole rectangle when its site lies inside it, and an empty
    /// polygon otherwise; coincident sites always get an empty polygon.
    ///
    /// Edge neighbours are site indices, or a `BOX_ID_*` side id for border edges.
    ///
    /// # Panics
    ///
    /// Panics if a border edge does not lie on a side of `bounds`, which only
    /// happens when the diagram was clipped to a different rectangle.
    pub fn polygons(&self, bounds: &BoundingBox) -> Vec<Polygon> {
        self.cells
            .par_iter()
            .map(|cell| {
                let id = cell.site.i;
                if cell.coincident.is_some() {
                    return Polygon::empty(id);
                }
                if cell.half_edges.is_empty() {
                    return if bounds.contains(cell.site.x, cell.site.y) {
                        Polygon::from_bounds(id, bounds)
                    } else {
                        Polygon::empty(id)
                    };
                }

                let mut vertices = Vec::with_capacity(cell.half_edges.len() * 2);
                let mut edge_neighbors = Vec::with_capacity(cell.half_edges.len());
                for half_edge in &cell.half_edges {
                    let edge = &self.edges[half_edge.edge];
                    let Some(start) = half_edge.start(edge) else { continue };
                    vertices.push(start.x);
                    vertices.push(start.y);
                    let neighbor = match edge.opposite(&cell.site) {
                        Some(other) => other.i as i32,
                        None => border_side(edge, bounds),
                    };
                    edge_neighbors.push(neighbor);
                }
                Polygon::new(id, vertices, edge_neighbors)
            })
            .collect()
    }

    /// One link per edge bordered by two sites.
    pub fn links(&self) -> Vec<Link> {
        self.edges
            .iter()
            .filter_map(|edge| {
                edge.right.map(|right| Link {
                    source: edge.left.i,
                    target: right.i,
                })
            })
            .collect()
    }

    /// Delaunay triangles as site index triples.
    ///
    /// Each triangle is reported once, by the cell with the smallest index,
    /// walking its neighbours in descending angle order.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut triangles = Vec::new();

        for (i, cell) in self.cells.iter().enumerate() {
            let site = cell.site;
            let mut half_edges = cell.half_edges.clone();
            half_edges.sort_by(|a, b| b.angle.partial_cmp(&a.angle).unwrap_or(std::cmp::Ordering::Equal));

            let neighbors: Vec<_> = half_edges
                .iter()
                .map(|half_edge| self.edges[half_edge.edge].opposite(&site))
                .collect();
            let Some(&last) = neighbors.last() else { continue };

            let mut s1 = last;
            for &s in &neighbors {
                let s0 = s1;
                s1 = s;
                let (Some(s0), Some(s1)) = (s0, s1) else { continue };
                if i < s0.i && i < s1.i && triangle_area(&site, &s0, &s1) < 0.0 {
                    triangles.push([i, s0.i, s1.i]);
                }
            }
        }

        triangles
    }
}

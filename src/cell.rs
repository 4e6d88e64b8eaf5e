use crate::bounds::BoundingBox;
use crate::edge::{Edge, HalfEdge};
use crate::point::{EPSILON, Point, Site};
use crate::sweep::Sweep;

/// The Voronoi region of one site, as a ring of half-edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub site: Site,
    /// Sorted by descending angle once the diagram is clipped; insertion order otherwise.
    pub half_edges: Vec<HalfEdge>,
    /// Index of the earlier site with identical coordinates, if this one was skipped.
    pub coincident: Option<usize>,
}

impl Cell {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            half_edges: Vec::new(),
            coincident: None,
        }
    }

    /// Drops half-edges whose edge never got both endpoints and sorts the rest
    /// by descending angle. Returns the number of surviving half-edges.
    pub fn prepare(&mut self, edges: &[Edge]) -> usize {
        self.half_edges.retain(|half_edge| edges[half_edge.edge].is_closed());
        self.half_edges.sort_by(|a, b| b.angle.partial_cmp(&a.angle).unwrap_or(std::cmp::Ordering::Equal));
        self.half_edges.len()
    }

    /// Start points of the ring, in ring order.
    pub fn vertices<'a>(&'a self, edges: &'a [Edge]) -> impl Iterator<Item = Point> + 'a {
        self.half_edges
            .iter()
            .filter_map(|half_edge| half_edge.start(&edges[half_edge.edge]))
    }
}

/// Point on the rectangle boundary to route an open ring through, walking
/// clockwise from `end` towards `start`.
///
/// The result is `start` itself when both lie on the same side, otherwise the
/// corner that ends the side `end` lies on.
fn border_target(end: Point, start: Point, bounds: &BoundingBox) -> Option<Point> {
    let [x0, y0] = bounds.min;
    let [x1, y1] = bounds.max;

    if (end.x - x0).abs() < EPSILON && y1 - end.y > EPSILON {
        let y = if (start.x - x0).abs() < EPSILON { start.y } else { y1 };
        Some(Point::new(x0, y))
    } else if (end.y - y1).abs() < EPSILON && x1 - end.x > EPSILON {
        let x = if (start.y - y1).abs() < EPSILON { start.x } else { x1 };
        Some(Point::new(x, y1))
    } else if (end.x - x1).abs() < EPSILON && end.y - y0 > EPSILON {
        let y = if (start.x - x1).abs() < EPSILON { start.y } else { y0 };
        Some(Point::new(x1, y))
    } else if (end.y - y0).abs() < EPSILON && end.x - x0 > EPSILON {
        let x = if (start.y - y0).abs() < EPSILON { start.x } else { x0 };
        Some(Point::new(x, y0))
    } else {
        None
    }
}

impl Sweep {
    /// Closes every non-empty cell into a single ring by inserting border edges
    /// wherever consecutive half-edges leave a gap.
    pub(crate) fn close_cells(&mut self, bounds: &BoundingBox) {
        for i in (0..self.cells.len()).rev() {
            if self.cells[i].prepare(&self.edges) == 0 {
                continue;
            }
            let site = self.cells[i].site;
            let mut count = self.cells[i].half_edges.len();
            let mut j = 0;
            while j < count {
                let half_edges = &self.cells[i].half_edges;
                let current = half_edges[j];
                j += 1;
                let following = half_edges[j % count];

                let (Some(end), Some(start)) = (
                    current.end(&self.edges[current.edge]),
                    following.start(&self.edges[following.edge]),
                ) else {
                    continue;
                };
                if (end.x - start.x).abs() <= EPSILON && (end.y - start.y).abs() <= EPSILON {
                    continue;
                }

                if !bounds.on_boundary(&start) {
                    tracing::warn!(site = i, x = start.x, y = start.y, "open cell start is not on the extent boundary");
                    continue;
                }
                let Some(target) = border_target(end, start, bounds) else {
                    tracing::warn!(site = i, x = end.x, y = end.y, "open cell end is not on the extent boundary");
                    continue;
                };
                let edge = self.create_border_edge(site, end, target);
                self.cells[i].half_edges.insert(j, HalfEdge::border(edge, site, end, target));
                count += 1;
            }
        }
    }
}

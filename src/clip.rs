use crate::bounds::BoundingBox;
use crate::edge::Edge;
use crate::point::Point;
use crate::sweep::Sweep;

/// Keeps a known endpoint unless it already lies past the far boundary.
fn keep_or(known: Option<Point>, fallback: Point, past: impl Fn(&Point) -> bool) -> Option<Point> {
    match known {
        Some(p) if past(&p) => None,
        Some(p) => Some(p),
        None => Some(fallback),
    }
}

/// Extends an edge with an open end along its bisector to the rectangle boundary.
///
/// Returns `false` when the edge cannot reach the rectangle.
pub fn connect_edge(edge: &mut Edge, bounds: &BoundingBox) -> bool {
    if edge.b.is_some() {
        return true;
    }
    let Some(right) = edge.right else {
        return false;
    };

    let [x0, y0] = bounds.min;
    let [x1, y1] = bounds.max;
    let (lx, ly) = (edge.left.x, edge.left.y);
    let (rx, ry) = (right.x, right.y);
    let fx = (lx + rx) / 2.0;
    let fy = (ly + ry) / 2.0;

    let (va, vb) = if ry == ly {
        // Vertical bisector.
        if fx < x0 || fx >= x1 {
            return false;
        }
        if lx > rx {
            let va = keep_or(edge.a, Point::new(fx, y0), |a| a.y >= y1);
            (va, Point::new(fx, y1))
        } else {
            let va = keep_or(edge.a, Point::new(fx, y1), |a| a.y < y0);
            (va, Point::new(fx, y0))
        }
    } else {
        let fm = (lx - rx) / (ry - ly);
        let fb = fy - fm * fx;
        if !(-1.0..=1.0).contains(&fm) {
            // Steep: intersect the top and bottom sides.
            if lx > rx {
                let va = keep_or(edge.a, Point::new((y0 - fb) / fm, y0), |a| a.y >= y1);
                (va, Point::new((y1 - fb) / fm, y1))
            } else {
                let va = keep_or(edge.a, Point::new((y1 - fb) / fm, y1), |a| a.y < y0);
                (va, Point::new((y0 - fb) / fm, y0))
            }
        } else if ly < ry {
            let va = keep_or(edge.a, Point::new(x0, fm * x0 + fb), |a| a.x >= x1);
            (va, Point::new(x1, fm * x1 + fb))
        } else {
            let va = keep_or(edge.a, Point::new(x1, fm * x1 + fb), |a| a.x < x0);
            (va, Point::new(x0, fm * x0 + fb))
        }
    };

    let Some(va) = va else {
        return false;
    };
    edge.a = Some(va);
    edge.b = Some(vb);
    true
}

/// Narrows `[t0, t1]` against one boundary. `delta` is the segment's extent along
/// the axis and `r` the offset from the segment start to the boundary.
fn clip_boundary(delta: f64, r: f64, is_min: bool, t0: &mut f64, t1: &mut f64) -> bool {
    if delta == 0.0 {
        return if is_min { r <= 0.0 } else { r >= 0.0 };
    }
    let r = r / delta;
    // Entering when moving towards the inside of this boundary.
    let entering = (delta > 0.0) == is_min;
    if entering {
        if r > *t1 {
            return false;
        }
        if r > *t0 {
            *t0 = r;
        }
    } else {
        if r < *t0 {
            return false;
        }
        if r < *t1 {
            *t1 = r;
        }
    }
    true
}

/// Liang–Barsky clip of a closed edge against the rectangle.
///
/// Returns `false` when the segment lies entirely outside.
pub fn clip_line(edge: &mut Edge, bounds: &BoundingBox) -> bool {
    let (Some(a), Some(b)) = (edge.a, edge.b) else {
        return false;
    };
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0;
    let mut t1 = 1.0;

    let inside = clip_boundary(dx, bounds.min[0] - a.x, true, &mut t0, &mut t1)
        && clip_boundary(dx, bounds.max[0] - a.x, false, &mut t0, &mut t1)
        && clip_boundary(dy, bounds.min[1] - a.y, true, &mut t0, &mut t1)
        && clip_boundary(dy, bounds.max[1] - a.y, false, &mut t0, &mut t1);
    if !inside {
        return false;
    }

    if t0 > 0.0 {
        edge.a = Some(Point::new(a.x + t0 * dx, a.y + t0 * dy));
    }
    if t1 < 1.0 {
        edge.b = Some(Point::new(a.x + t1 * dx, a.y + t1 * dy));
    }
    true
}

impl Sweep {
    /// Connects and clips every edge, dropping the ones that miss the rectangle
    /// or collapse to a point. Half-edges of dropped edges are removed as well.
    pub(crate) fn clip_edges(&mut self, bounds: &BoundingBox) {
        let mut remap = vec![None; self.edges.len()];
        let mut kept = Vec::with_capacity(self.edges.len());
        for (id, mut edge) in self.edges.drain(..).enumerate() {
            if connect_edge(&mut edge, bounds) && clip_line(&mut edge, bounds) && !edge.is_degenerate() {
                remap[id] = Some(kept.len());
                kept.push(edge);
            }
        }
        self.edges = kept;

        for cell in &mut self.cells {
            cell.half_edges.retain_mut(|half_edge| match remap[half_edge.edge] {
                Some(id) => {
                    half_edge.edge = id;
                    true
                }
                None => false,
            });
        }
    }
}

use crate::point::EPSILON2;
use crate::sweep::Sweep;
use crate::tree::NodeId;

/// Predicted convergence of an arc with both of its neighbours.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Circle {
    /// The arc that vanishes when the event fires.
    pub arc: NodeId,
    pub x: f64,
    /// Far side of the circumcircle along the sweep; the position at which the event fires.
    pub y: f64,
    /// Circumcenter y, the actual Voronoi vertex.
    pub cy: f64,
}

impl Circle {
    /// Event order: ascending `y`, ties broken by ascending `x`.
    fn precedes(&self, other: &Circle) -> bool {
        self.y < other.y || (self.y == other.y && self.x <= other.x)
    }
}

impl Sweep {
    /// Schedules the circle event of `arc` if its neighbours converge ahead of the sweep.
    pub(crate) fn attach_circle(&mut self, arc: NodeId) {
        let (Some(l_arc), Some(r_arc)) = (self.beaches.prev(arc), self.beaches.next(arc)) else {
            return;
        };

        let l_site = self.beaches.get(l_arc).site;
        let c_site = self.beaches.get(arc).site;
        let r_site = self.beaches.get(r_arc).site;

        if l_site.i == r_site.i {
            return;
        }

        let bx = c_site.x;
        let by = c_site.y;
        let ax = l_site.x - bx;
        let ay = l_site.y - by;
        let cx = r_site.x - bx;
        let cy = r_site.y - by;

        // A non-negative determinant means the breakpoints diverge or the sites are collinear.
        let d = 2.0 * (ax * cy - ay * cx);
        if d >= -EPSILON2 {
            return;
        }

        let ha = ax * ax + ay * ay;
        let hc = cx * cx + cy * cy;
        let x = (cy * ha - ay * hc) / d;
        let y = (ax * hc - cx * ha) / d;
        let center_y = y + by;

        let circle = Circle {
            arc,
            x: x + bx,
            y: center_y + (x * x + y * y).sqrt(),
            cy: center_y,
        };

        let mut before = None;
        let mut node = self.circles.root();
        while let Some(n) = node {
            if circle.precedes(self.circles.get(n)) {
                match self.circles.left(n) {
                    Some(left) => node = Some(left),
                    None => {
                        before = self.circles.prev(n);
                        break;
                    }
                }
            } else {
                match self.circles.right(n) {
                    Some(right) => node = Some(right),
                    None => {
                        before = Some(n);
                        break;
                    }
                }
            }
        }

        let id = self.circles.insert(before, circle);
        self.beaches.get_mut(arc).circle = Some(id);
        if before.is_none() {
            self.first_circle = Some(id);
        }
    }

    /// Cancels the pending circle event of `arc`, if any.
    pub(crate) fn detach_circle(&mut self, arc: NodeId) {
        let Some(circle) = self.beaches.get_mut(arc).circle.take() else {
            return;
        };
        if self.circles.prev(circle).is_none() {
            self.first_circle = self.circles.next(circle);
        }
        self.circles.remove(circle);
    }
}

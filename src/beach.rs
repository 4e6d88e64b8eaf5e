use std::collections::VecDeque;

use crate::point::{EPSILON, Point, Site};
use crate::sweep::Sweep;
use crate::tree::NodeId;
use crate::edge::EdgeId;

/// One parabolic arc of the beachline.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Beach {
    pub site: Site,
    /// Bisector traced between this arc and its left neighbour.
    pub edge: Option<EdgeId>,
    /// Pending circle event in which this arc vanishes.
    pub circle: Option<NodeId>,
}

impl Beach {
    fn new(site: Site) -> Self {
        Self { site, edge: None, circle: None }
    }
}

/// x-coordinate where the parabola of `left` meets the parabola of `site`.
///
/// Both parabolas share the directrix `y = directrix`. A focus lying on the
/// directrix degenerates into a vertical ray at the focus x.
pub(crate) fn left_break_point(site: Site, left: Option<Site>, directrix: f64) -> f64 {
    let rfocx = site.x;
    let rfocy = site.y;
    let pby2 = rfocy - directrix;

    if pby2 == 0.0 {
        return rfocx;
    }

    let Some(left) = left else {
        return f64::NEG_INFINITY;
    };

    let lfocx = left.x;
    let lfocy = left.y;
    let plby2 = lfocy - directrix;

    if plby2 == 0.0 {
        return lfocx;
    }

    let hl = lfocx - rfocx;
    let aby2 = 1.0 / pby2 - 1.0 / plby2;
    let b = hl / plby2;

    if aby2 != 0.0 {
        let c = hl * hl / (-2.0 * plby2) - lfocy + plby2 / 2.0 + rfocy - pby2 / 2.0;
        return (-b + (b * b - 2.0 * aby2 * c).sqrt()) / aby2 + rfocx;
    }

    (rfocx + lfocx) / 2.0
}

/// Circumcenter of the three sites, computed relative to `a`.
fn circumcenter(a: Site, b: Site, c: Site) -> Point {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;
    let d = 2.0 * (bx * cy - by * cx);
    let hb = bx * bx + by * by;
    let hc = cx * cx + cy * cy;
    Point::new((cy * hb - by * hc) / d + a.x, (bx * hc - cx * hb) / d + a.y)
}

impl Sweep {
    fn arc_site(&self, arc: NodeId) -> Site {
        self.beaches.get(arc).site
    }

    fn arc_left_break_point(&self, arc: NodeId, directrix: f64) -> f64 {
        let left = self.beaches.prev(arc).map(|l| self.arc_site(l));
        left_break_point(self.arc_site(arc), left, directrix)
    }

    fn arc_right_break_point(&self, arc: NodeId, directrix: f64) -> f64 {
        if let Some(right) = self.beaches.next(arc) {
            return self.arc_left_break_point(right, directrix);
        }
        let site = self.arc_site(arc);
        if site.y == directrix { site.x } else { f64::INFINITY }
    }

    /// Finds the arc(s) above `x` at the given directrix.
    ///
    /// Returns the arcs left and right of the insertion point; both are the same
    /// arc when `x` falls strictly inside it.
    fn locate(&self, x: f64, directrix: f64) -> (Option<NodeId>, Option<NodeId>) {
        let mut node = self.beaches.root();
        while let Some(n) = node {
            let dxl = self.arc_left_break_point(n, directrix) - x;
            if dxl > EPSILON {
                node = self.beaches.left(n);
                continue;
            }
            let dxr = x - self.arc_right_break_point(n, directrix);
            if dxr > EPSILON {
                match self.beaches.right(n) {
                    Some(right) => node = Some(right),
                    None => return (Some(n), None),
                }
            } else if dxl > -EPSILON {
                return (self.beaches.prev(n), Some(n));
            } else if dxr > -EPSILON {
                return (Some(n), self.beaches.next(n));
            } else {
                return (Some(n), Some(n));
            }
        }
        (None, None)
    }

    /// Inserts the arc of a newly swept site into the beachline.
    pub(crate) fn add_site(&mut self, site: Site) {
        let (l_arc, r_arc) = self.locate(site.x, site.y);
        let new_arc = self.beaches.insert(l_arc, Beach::new(site));

        match (l_arc, r_arc) {
            (None, None) => {}
            // Splitting one arc: the old arc reappears on the right of the new one.
            (Some(l_arc), Some(r_arc)) if l_arc == r_arc => {
                self.detach_circle(l_arc);
                let l_site = self.arc_site(l_arc);
                let r_arc = self.beaches.insert(Some(new_arc), Beach::new(l_site));
                let edge = self.create_edge(l_site, site, None, None);
                self.beaches.get_mut(new_arc).edge = Some(edge);
                self.beaches.get_mut(r_arc).edge = Some(edge);
                self.attach_circle(l_arc);
                self.attach_circle(r_arc);
            }
            (Some(l_arc), None) => {
                let l_site = self.arc_site(l_arc);
                let edge = self.create_edge(l_site, site, None, None);
                self.beaches.get_mut(new_arc).edge = Some(edge);
            }
            (None, Some(r_arc)) => {
                let r_site = self.arc_site(r_arc);
                let edge = self.create_edge(site, r_site, None, None);
                self.beaches.get_mut(r_arc).edge = Some(edge);
            }
            // Landing exactly on a breakpoint: the old bisector ends at the new vertex.
            (Some(l_arc), Some(r_arc)) => {
                self.detach_circle(l_arc);
                self.detach_circle(r_arc);

                let l_site = self.arc_site(l_arc);
                let r_site = self.arc_site(r_arc);
                let vertex = circumcenter(l_site, site, r_site);

                debug_assert!(self.beaches.get(r_arc).edge.is_some());
                if let Some(edge) = self.beaches.get(r_arc).edge {
                    self.set_edge_end(edge, l_site, r_site, vertex);
                }
                let left_edge = self.create_edge(l_site, site, None, Some(vertex));
                let right_edge = self.create_edge(site, r_site, None, Some(vertex));
                self.beaches.get_mut(new_arc).edge = Some(left_edge);
                self.beaches.get_mut(r_arc).edge = Some(right_edge);

                self.attach_circle(l_arc);
                self.attach_circle(r_arc);
            }
        }
    }

    fn detach_beach(&mut self, arc: NodeId) {
        self.detach_circle(arc);
        self.beaches.remove(arc);
    }

    fn converges_at(&self, arc: NodeId, vertex: &Point) -> bool {
        self.beaches.get(arc).circle.is_some_and(|c| {
            let circle = self.circles.get(c);
            (vertex.x - circle.x).abs() < EPSILON && (vertex.y - circle.cy).abs() < EPSILON
        })
    }

    /// Fires a circle event: the arcs meeting at its vertex leave the beachline.
    ///
    /// Neighbours whose own events predict the same vertex (co-circular sites)
    /// are removed in the same pass.
    pub(crate) fn remove_arc(&mut self, circle: NodeId) {
        let event = *self.circles.get(circle);
        let vertex = Point::new(event.x, event.cy);
        let arc = event.arc;

        let mut previous = self.beaches.prev(arc).expect("vanishing arc has a left neighbour");
        let mut next = self.beaches.next(arc).expect("vanishing arc has a right neighbour");
        let mut disappearing = VecDeque::from([(arc, *self.beaches.get(arc))]);
        self.detach_beach(arc);

        let mut l_arc = previous;
        while self.converges_at(l_arc, &vertex) {
            previous = self.beaches.prev(l_arc).expect("arc with a circle has a left neighbour");
            disappearing.push_front((l_arc, *self.beaches.get(l_arc)));
            self.detach_beach(l_arc);
            l_arc = previous;
        }
        disappearing.push_front((l_arc, *self.beaches.get(l_arc)));
        self.detach_circle(l_arc);

        let mut r_arc = next;
        while self.converges_at(r_arc, &vertex) {
            next = self.beaches.next(r_arc).expect("arc with a circle has a right neighbour");
            disappearing.push_back((r_arc, *self.beaches.get(r_arc)));
            self.detach_beach(r_arc);
            r_arc = next;
        }
        disappearing.push_back((r_arc, *self.beaches.get(r_arc)));
        self.detach_circle(r_arc);

        if disappearing.len() > 3 {
            tracing::trace!(arcs = disappearing.len(), x = vertex.x, y = vertex.y, "co-circular vertex");
        }

        for (left, right) in disappearing.iter().zip(disappearing.iter().skip(1)) {
            if let Some(edge) = right.1.edge {
                self.set_edge_end(edge, left.1.site, right.1.site, vertex);
            }
        }

        let (l_arc, l_beach) = disappearing[0];
        let (r_arc, r_beach) = disappearing[disappearing.len() - 1];
        let edge = self.create_edge(l_beach.site, r_beach.site, None, Some(vertex));
        self.beaches.get_mut(r_arc).edge = Some(edge);

        self.attach_circle(l_arc);
        self.attach_circle(r_arc);
    }
}

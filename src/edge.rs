use crate::point::{EPSILON, Point, Site};
use crate::sweep::Sweep;

pub type EdgeId = usize;

/// A bisector between two sites, or a border segment when `right` is `None`.
///
/// `a` and `b` are filled in as the sweep discovers vertices and as clipping
/// extends open ends to the extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub left: Site,
    pub right: Option<Site>,
    pub a: Option<Point>,
    pub b: Option<Point>,
}

impl Edge {
    pub(crate) fn new(left: Site, right: Option<Site>) -> Self {
        Self { left, right, a: None, b: None }
    }

    /// Border edges run along the clipping rectangle and only have one site.
    pub fn is_border(&self) -> bool {
        self.right.is_none()
    }

    /// Both endpoints are known.
    pub fn is_closed(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    /// Clipped length collapsed to a point.
    pub(crate) fn is_degenerate(&self) -> bool {
        match (self.a, self.b) {
            (Some(a), Some(b)) => (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON,
            _ => false,
        }
    }

    /// The site on the other side of the edge as seen from `site`.
    pub fn opposite(&self, site: &Site) -> Option<Site> {
        if self.left.i == site.i { self.right } else { Some(self.left) }
    }

    /// Records a vertex on the edge, oriented as seen from `left` towards `right`.
    ///
    /// The first endpoint fixes the canonical `(left, right)` order; later calls
    /// fill whichever end matches the given orientation.
    pub(crate) fn set_end(&mut self, left: Site, right: Site, vertex: Point) {
        if self.a.is_none() && self.b.is_none() {
            self.a = Some(vertex);
            self.left = left;
            self.right = Some(right);
        } else if self.left.i == right.i {
            self.b = Some(vertex);
        } else {
            self.a = Some(vertex);
        }
    }
}

/// Direction in which a cell traverses a shared edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// The owning site is the edge's left site: `a` to `b`.
    Forward,
    /// The owning site is the edge's right site: `b` to `a`.
    Backward,
}

/// Cell-local view of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfEdge {
    pub edge: EdgeId,
    pub site: Site,
    /// Sort key around the owning site.
    pub angle: f64,
}

impl HalfEdge {
    /// Half-edge of a bisector, angled towards the neighbouring site.
    pub(crate) fn new(edge: EdgeId, site: Site, other: Site) -> Self {
        Self {
            edge,
            site,
            angle: (other.y - site.y).atan2(other.x - site.x),
        }
    }

    /// Half-edge of a border edge from `a` to `b`, angled along the outward normal.
    pub(crate) fn border(edge: EdgeId, site: Site, a: Point, b: Point) -> Self {
        Self {
            edge,
            site,
            angle: (b.x - a.x).atan2(a.y - b.y),
        }
    }

    /// Orientation is read from the edge each time; the sweep may swap an edge's
    /// sites when it records the first vertex.
    pub fn orientation(&self, edge: &Edge) -> Orientation {
        if edge.left.i == self.site.i { Orientation::Forward } else { Orientation::Backward }
    }

    pub fn start(&self, edge: &Edge) -> Option<Point> {
        match self.orientation(edge) {
            Orientation::Forward => edge.a,
            Orientation::Backward => edge.b,
        }
    }

    pub fn end(&self, edge: &Edge) -> Option<Point> {
        match self.orientation(edge) {
            Orientation::Forward => edge.b,
            Orientation::Backward => edge.a,
        }
    }
}

impl Sweep {
    /// Allocates the bisector of `left` and `right` and registers it with both cells.
    pub(crate) fn create_edge(&mut self, left: Site, right: Site, va: Option<Point>, vb: Option<Point>) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge::new(left, Some(right)));
        if let Some(va) = va {
            self.set_edge_end(id, left, right, va);
        }
        if let Some(vb) = vb {
            self.set_edge_end(id, right, left, vb);
        }
        self.cells[left.i].half_edges.push(HalfEdge::new(id, left, right));
        self.cells[right.i].half_edges.push(HalfEdge::new(id, right, left));
        id
    }

    pub(crate) fn set_edge_end(&mut self, edge: EdgeId, left: Site, right: Site, vertex: Point) {
        self.edges[edge].set_end(left, right, vertex);
    }

    /// Adds a closed segment of the clipping rectangle owned by `site` alone.
    ///
    /// The caller attaches the half-edge, since it decides where in the ring it goes.
    pub(crate) fn create_border_edge(&mut self, site: Site, va: Point, vb: Point) -> EdgeId {
        let mut edge = Edge::new(site, None);
        edge.a = Some(va);
        edge.b = Some(vb);
        self.edges.push(edge);
        self.edges.len() - 1
    }
}

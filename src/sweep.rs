use crate::beach::Beach;
use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::circle::Circle;
use crate::diagram::Diagram;
use crate::edge::Edge;
use crate::point::Site;
use crate::tree::{NodeId, RbTree};

/// Mutable state of a single Fortune sweep.
///
/// Every call to [`compute_voronoi`] builds its own `Sweep`, so independent
/// computations never share trees, edges or cells and can run on separate threads.
pub(crate) struct Sweep {
    pub(crate) beaches: RbTree<Beach>,
    pub(crate) circles: RbTree<Circle>,
    /// Earliest pending circle event.
    pub(crate) first_circle: Option<NodeId>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) cells: Vec<Cell>,
}

impl Sweep {
    /// Creates the context with one empty cell per site, indexed by `Site::i`.
    pub(crate) fn new(sites: &[Site]) -> Self {
        let mut cells: Vec<Cell> = sites.iter().map(|&site| Cell::new(site)).collect();
        cells.sort_by_key(|cell| cell.site.i);
        debug_assert!(
            cells.iter().enumerate().all(|(k, cell)| cell.site.i == k),
            "site indices must be dense and unique"
        );

        Self {
            beaches: RbTree::new(),
            circles: RbTree::new(),
            first_circle: None,
            edges: Vec::new(),
            cells,
        }
    }

    fn into_diagram(self) -> Diagram {
        Diagram {
            cells: self.cells,
            edges: self.edges,
        }
    }
}

/// Sweep order: descending `(y, x)`, so the next site is popped off the end.
fn lexicographic(a: &Site, b: &Site) -> std::cmp::Ordering {
    b.y.partial_cmp(&a.y)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(b.x.partial_cmp(&a.x).unwrap_or(std::cmp::Ordering::Equal))
}

/// Computes the Voronoi diagram of `sites` with Fortune's algorithm.
///
/// Site indices must be dense, `0..sites.len()`. With an extent, edges are
/// clipped to it and every cell with a visible boundary is closed into a ring;
/// without one the raw sweep output is returned, open edges included.
///
/// Sites repeating the coordinates of an earlier site are skipped; their cells
/// stay empty and record the index of the site they coincide with.
pub fn compute_voronoi(sites: &[Site], extent: Option<&BoundingBox>) -> Diagram {
    let mut sweep = Sweep::new(sites);
    let mut queue = sites.to_vec();
    queue.sort_by(lexicographic);

    let mut site = queue.pop();
    let mut last: Option<Site> = None;

    loop {
        debug_assert_eq!(sweep.first_circle, sweep.circles.first());
        let circle = sweep.first_circle.map(|id| (id, *sweep.circles.get(id)));
        let next_site = site.filter(|s| {
            circle.is_none_or(|(_, c)| s.y < c.y || (s.y == c.y && s.x < c.x))
        });

        if let Some(s) = next_site {
            match last {
                Some(prev) if prev.x == s.x && prev.y == s.y => {
                    sweep.cells[s.i].coincident = Some(prev.i);
                }
                _ => {
                    sweep.add_site(s);
                    last = Some(s);
                }
            }
            site = queue.pop();
        } else if let Some((id, _)) = circle {
            sweep.remove_arc(id);
        } else {
            break;
        }
    }

    if let Some(bounds) = extent {
        sweep.clip_edges(bounds);
        sweep.close_cells(bounds);
    }

    tracing::debug!(
        sites = sites.len(),
        edges = sweep.edges.len(),
        cells = sweep.cells.iter().filter(|c| !c.half_edges.is_empty()).count(),
        clipped = extent.is_some(),
        "voronoi sweep complete"
    );

    sweep.into_diagram()
}

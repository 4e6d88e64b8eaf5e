use rand::Rng;
use rayon::prelude::*;

use crate::bounds::BoundingBox;
use crate::diagram::{Diagram, Link};
use crate::error::{Result, VoronoiError};
use crate::point::{Point, Site, snap};
use crate::polygon::Polygon;
use crate::sweep::compute_voronoi;

/// Types that carry planar coordinates directly.
pub trait Coordinates {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Coordinates for [f64; 2] {
    fn x(&self) -> f64 { self[0] }
    fn y(&self) -> f64 { self[1] }
}

impl Coordinates for (f64, f64) {
    fn x(&self) -> f64 { self.0 }
    fn y(&self) -> f64 { self.1 }
}

impl Coordinates for Point {
    fn x(&self) -> f64 { self.x }
    fn y(&self) -> f64 { self.y }
}

type Accessor<T> = Box<dyn Fn(&T, usize) -> f64 + Send + Sync>;

/// Configurable Voronoi layout over caller records of type `T`.
///
/// Holds the coordinate accessors and the clipping extent; every call computes
/// a fresh diagram, so one layout can serve any number of threads.
pub struct Voronoi<T> {
    x: Accessor<T>,
    y: Accessor<T>,
    extent: BoundingBox,
}

impl<T: Coordinates + 'static> Default for Voronoi<T> {
    fn default() -> Self {
        Self::with_accessors(|d: &T, _| d.x(), |d: &T, _| d.y())
    }
}

impl<T: Coordinates + 'static> Voronoi<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Voronoi<T> {
    /// Creates a layout reading coordinates with `x` and `y`, which receive the
    /// record and its position in the input.
    pub fn with_accessors<FX, FY>(x: FX, y: FY) -> Self
    where
        FX: Fn(&T, usize) -> f64 + Send + Sync + 'static,
        FY: Fn(&T, usize) -> f64 + Send + Sync + 'static,
    {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            extent: BoundingBox::null(),
        }
    }

    /// The configured extent, or `None` while the default null extent is active.
    pub fn extent(&self) -> Option<BoundingBox> {
        if self.extent.is_null() { None } else { Some(self.extent) }
    }

    /// The upper corner of the extent, if one is set.
    pub fn size(&self) -> Option<[f64; 2]> {
        self.extent().map(|e| e.max)
    }

    pub fn set_extent(&mut self, min: [f64; 2], max: [f64; 2]) -> Result<()> {
        let finite = min.iter().chain(max.iter()).all(|v| v.is_finite());
        if !finite || min[0] >= max[0] || min[1] >= max[1] {
            return Err(VoronoiError::InvalidExtent { min, max });
        }
        self.extent = BoundingBox::new(min, max);
        Ok(())
    }

    /// Shorthand for an extent from the origin to `[width, height]`.
    pub fn set_size(&mut self, size: [f64; 2]) -> Result<()> {
        self.set_extent([0.0, 0.0], size)
    }

    pub fn clear_extent(&mut self) {
        self.extent = BoundingBox::null();
    }

    pub fn with_extent(mut self, min: [f64; 2], max: [f64; 2]) -> Result<Self> {
        self.set_extent(min, max)?;
        Ok(self)
    }

    pub fn with_size(mut self, size: [f64; 2]) -> Result<Self> {
        self.set_size(size)?;
        Ok(self)
    }

    /// Extracts sites, snapping coordinates onto the epsilon grid.
    pub fn sites(&self, data: &[T]) -> Result<Vec<Site>> {
        data.iter()
            .enumerate()
            .map(|(i, d)| {
                let x = (self.x)(d, i);
                let y = (self.y)(d, i);
                if !x.is_finite() || !y.is_finite() {
                    return Err(VoronoiError::NonFiniteCoordinate { index: i, x, y });
                }
                Ok(Site::new(snap(x), snap(y), i))
            })
            .collect()
    }

    /// The diagram clipped to the extent (the null extent when none is set).
    pub fn diagram(&self, data: &[T]) -> Result<Diagram> {
        let sites = self.sites(data)?;
        Ok(compute_voronoi(&sites, Some(&self.extent)))
    }

    /// One polygon per input record, in input order.
    pub fn polygons(&self, data: &[T]) -> Result<Vec<Polygon>> {
        Ok(self.diagram(data)?.polygons(&self.extent))
    }

    /// Delaunay edges between input records; ignores the extent.
    pub fn links(&self, data: &[T]) -> Result<Vec<Link>> {
        let sites = self.sites(data)?;
        Ok(compute_voronoi(&sites, None).links())
    }

    /// Delaunay triangles between input records; ignores the extent.
    pub fn triangles(&self, data: &[T]) -> Result<Vec<[usize; 3]>> {
        let sites = self.sites(data)?;
        Ok(compute_voronoi(&sites, None).triangles())
    }
}

impl Voronoi<[f64; 2]> {
    /// Lloyd relaxation: moves each point to the centroid of its polygon.
    ///
    /// Points whose polygon is empty stay where they are.
    pub fn relax(&self, points: &[[f64; 2]], iterations: usize) -> Result<Vec<[f64; 2]>> {
        let mut points = points.to_vec();
        for _ in 0..iterations {
            let polygons = self.polygons(&points)?;
            points = polygons
                .par_iter()
                .zip(points.par_iter())
                .map(|(polygon, original)| polygon.centroid().unwrap_or(*original))
                .collect();
        }
        Ok(points)
    }
}

/// Draws `count` uniformly distributed points inside `bounds`.
pub fn random_points<R: Rng>(bounds: &BoundingBox, count: usize, rng: &mut R) -> Vec<[f64; 2]> {
    (0..count)
        .map(|_| {
            [
                rng.gen_range(bounds.min[0]..bounds.max[0]),
                rng.gen_range(bounds.min[1]..bounds.max[1]),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Town {
        lon: f64,
        lat: f64,
    }

    #[test]
    fn test_extent_validation() {
        let mut layout = Voronoi::<[f64; 2]>::new();
        assert_eq!(layout.extent(), None);

        assert!(layout.set_extent([0.0, 0.0], [10.0, 5.0]).is_ok());
        assert_eq!(layout.size(), Some([10.0, 5.0]));

        let err = layout.set_extent([1.0, 0.0], [0.0, 1.0]).unwrap_err();
        assert!(matches!(err, VoronoiError::InvalidExtent { .. }));
        assert!(layout.set_size([f64::NAN, 1.0]).is_err());

        layout.clear_extent();
        assert_eq!(layout.extent(), None);
    }

    #[test]
    fn test_sites_are_snapped_and_validated() {
        let layout = Voronoi::<[f64; 2]>::new();
        let sites = layout.sites(&[[0.100_000_04, 1.0], [2.0, 3.0]]).unwrap();
        assert!((sites[0].x - 0.1).abs() < 1e-12);
        assert_eq!(sites[1].i, 1);

        let err = layout.sites(&[[0.0, 0.0], [f64::INFINITY, 1.0]]).unwrap_err();
        assert_eq!(err, VoronoiError::NonFiniteCoordinate { index: 1, x: f64::INFINITY, y: 1.0 });
    }

    #[test]
    fn test_custom_accessors() {
        let layout = Voronoi::with_accessors(|t: &Town, _| t.lon, |t: &Town, _| t.lat)
            .with_size([10.0, 10.0])
            .unwrap();
        let towns = [Town { lon: 2.0, lat: 5.0 }, Town { lon: 8.0, lat: 5.0 }];
        let polygons = layout.polygons(&towns).unwrap();
        assert_eq!(polygons.len(), 2);
        assert!((polygons[0].area() - 50.0).abs() < 1e-6);
        assert_eq!(layout.links(&towns).unwrap().len(), 1);
    }

    #[test]
    fn test_relax_moves_points_to_centroids() {
        let layout = Voronoi::<[f64; 2]>::new().with_size([10.0, 10.0]).unwrap();
        let points = [[1.0, 5.0], [9.0, 5.0]];
        let relaxed = layout.relax(&points, 1).unwrap();
        assert!((relaxed[0][0] - 2.5).abs() < 1e-6);
        assert!((relaxed[0][1] - 5.0).abs() < 1e-6);
        assert!((relaxed[1][0] - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_random_points_inside_bounds() {
        let bounds = BoundingBox::new([-5.0, 2.0], [5.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(7);
        let points = random_points(&bounds, 100, &mut rng);
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|p| bounds.contains(p[0], p[1])));
    }
}

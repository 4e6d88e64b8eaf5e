use rand::SeedableRng;
use rand::rngs::StdRng;
use vorotwo::{BoundingBox, Voronoi, random_points};

const GRID_SIZE: usize = 6;

fn generate_grid(size: f64) -> Vec<[f64; 2]> {
    let n = GRID_SIZE;
    let step = size / n as f64;
    let offset = step / 2.0;

    let mut points = Vec::with_capacity(n * n);
    for x in 0..n {
        for y in 0..n {
            points.push([x as f64 * step + offset, y as f64 * step + offset]);
        }
    }
    points
}

fn total_area(layout: &Voronoi<[f64; 2]>, points: &[[f64; 2]]) -> f64 {
    layout.polygons(points).unwrap().iter().map(|p| p.area()).sum()
}

macro_rules! test_tiling {
    ($test_name:ident, $seed:expr, $count:expr, $min:expr, $max:expr) => {
        #[test]
        fn $test_name() {
            let bounds = BoundingBox::new($min, $max);
            let layout = Voronoi::<[f64; 2]>::new().with_extent($min, $max).unwrap();
            let mut rng = StdRng::seed_from_u64($seed);
            let points = random_points(&bounds, $count, &mut rng);

            let total = total_area(&layout, &points);
            let expected = bounds.area();
            let error = (total - expected).abs() / expected;
            println!("{} Area: Got {:.6}, Expected {:.6}, Error {:.2e}", stringify!($test_name), total, expected, error);
            assert!(error < 1e-9, "Area error too high: {:.2e}", error);
        }
    };
}

test_tiling!(test_tiling_few_sites, 1, 5, [0.0, 0.0], [10.0, 10.0]);
test_tiling!(test_tiling_many_sites, 2, 500, [0.0, 0.0], [100.0, 100.0]);
test_tiling!(test_tiling_offset_extent, 3, 100, [-40.0, 10.0], [25.0, 30.0]);
test_tiling!(test_tiling_thin_extent, 4, 50, [0.0, 0.0], [1000.0, 1.0]);

#[test]
fn test_tiling_grid() {
    let size = 12.0;
    let layout = Voronoi::<[f64; 2]>::new().with_size([size, size]).unwrap();
    let points = generate_grid(size);

    let polygons = layout.polygons(&points).unwrap();
    let expected = (size / GRID_SIZE as f64).powi(2);
    for polygon in &polygons {
        assert!(
            (polygon.area() - expected).abs() < 1e-6,
            "Grid cell {} area {} expected {}",
            polygon.id(),
            polygon.area(),
            expected
        );
    }
}

#[test]
fn test_tiling_after_relax() {
    let bounds = BoundingBox::new([0.0, 0.0], [20.0, 20.0]);
    let layout = Voronoi::<[f64; 2]>::new().with_size([20.0, 20.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let points = random_points(&bounds, 80, &mut rng);

    let relaxed = layout.relax(&points, 3).unwrap();
    assert_eq!(relaxed.len(), points.len());
    assert!(relaxed.iter().all(|p| bounds.contains(p[0], p[1])));
    assert!((total_area(&layout, &relaxed) - 400.0).abs() < 1e-6);
}

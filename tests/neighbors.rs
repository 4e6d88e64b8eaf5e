use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use vorotwo::{BoundingBox, Voronoi, random_points, BOX_ID_TOP, BOX_ID_LEFT};

#[test]
fn test_two_cells_neighbors() {
    let layout = Voronoi::<[f64; 2]>::new().with_size([10.0, 10.0]).unwrap();
    let points = [[2.5, 5.0], [7.5, 5.0]];
    let polygons = layout.polygons(&points).unwrap();

    // c0 should have neighbor 1
    assert!(polygons[0].edge_neighbors().contains(&1));
    // c1 should have neighbor 0
    assert!(polygons[1].edge_neighbors().contains(&0));
}

#[test]
fn test_neighbor_reciprocity_random() {
    let bounds = BoundingBox::new([0.0, 0.0], [30.0, 30.0]);
    let layout = Voronoi::<[f64; 2]>::new().with_size([30.0, 30.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_points(&bounds, 60, &mut rng);

    let polygons = layout.polygons(&points).unwrap();
    for (i, polygon) in polygons.iter().enumerate() {
        let neighbors = polygon.edge_neighbors();
        assert_eq!(neighbors.len(), polygon.len(), "One neighbor per edge in cell {}", i);

        for &n_id in &neighbors {
            if n_id >= 0 {
                let neighbor_neighbors = polygons[n_id as usize].edge_neighbors();
                assert!(
                    neighbor_neighbors.contains(&(i as i32)),
                    "Reciprocity fail: cell {} has neighbor {}, but {} has neighbors {:?}",
                    i,
                    n_id,
                    n_id,
                    neighbor_neighbors
                );
            } else {
                assert!((BOX_ID_TOP..=BOX_ID_LEFT).contains(&n_id), "Unknown side id {}", n_id);
            }
        }
    }
}

#[test]
fn test_polygon_neighbors_are_links() {
    let bounds = BoundingBox::new([0.0, 0.0], [50.0, 20.0]);
    let layout = Voronoi::<[f64; 2]>::new().with_extent(bounds.min, bounds.max).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let points = random_points(&bounds, 40, &mut rng);

    let links: HashSet<(usize, usize)> = layout
        .links(&points)
        .unwrap()
        .iter()
        .map(|l| (l.source.min(l.target), l.source.max(l.target)))
        .collect();

    for polygon in layout.polygons(&points).unwrap() {
        let i = polygon.id();
        for n in polygon.edge_neighbors().into_iter().filter(|&n| n >= 0) {
            let n = n as usize;
            assert!(links.contains(&(i.min(n), i.max(n))), "Missing link {} - {}", i, n);
        }
    }
}

#[test]
fn test_sites_inside_their_polygons() {
    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);
    let layout = Voronoi::<[f64; 2]>::new().with_size([100.0, 100.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let points = random_points(&bounds, 200, &mut rng);

    for (polygon, p) in layout.polygons(&points).unwrap().iter().zip(&points) {
        assert!(polygon.contains(p[0], p[1]), "Site {:?} outside cell {}", p, polygon.id());
    }
}

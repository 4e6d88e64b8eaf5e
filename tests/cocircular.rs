use std::f64::consts::PI;
use vorotwo::{Voronoi, EPSILON};

fn ring(count: usize, radius: f64, phase: f64) -> Vec<[f64; 2]> {
    (0..count)
        .map(|k| {
            let angle = phase + 2.0 * PI * k as f64 / count as f64;
            [5.0 + radius * angle.cos(), 5.0 + radius * angle.sin()]
        })
        .collect()
}

#[test]
fn test_square_of_four() {
    let layout = Voronoi::<[f64; 2]>::new().with_size([10.0, 10.0]).unwrap();
    let points = [[2.5, 2.5], [7.5, 2.5], [7.5, 7.5], [2.5, 7.5]];

    let diagram = layout.diagram(&points).unwrap();
    assert!(diagram.edges.iter().all(|e| e.is_closed()));

    for polygon in layout.polygons(&points).unwrap() {
        assert_eq!(polygon.len(), 4, "Cell {} should be a square", polygon.id());
        assert!((polygon.area() - 25.0).abs() < 1e-6, "Cell {} area {}", polygon.id(), polygon.area());
    }
}

#[test]
fn test_octagon_meets_in_one_vertex() {
    let layout = Voronoi::<[f64; 2]>::new().with_size([10.0, 10.0]).unwrap();
    // Rotated off the axes so the square extent maps every cell onto every other.
    let points = ring(8, 4.0, PI / 8.0);
    let polygons = layout.polygons(&points).unwrap();

    let total: f64 = polygons.iter().map(|p| p.area()).sum();
    assert!((total - 100.0).abs() < 1e-6, "Total area {}", total);

    for polygon in &polygons {
        assert!((polygon.area() - 12.5).abs() < 1e-4, "Cell {} area {}", polygon.id(), polygon.area());
        let at_center = polygon
            .points()
            .filter(|p| (p[0] - 5.0).abs() < 1e3 * EPSILON && (p[1] - 5.0).abs() < 1e3 * EPSILON)
            .count();
        assert!(at_center >= 1, "Cell {} misses the shared vertex", polygon.id());
    }
}

#[test]
fn test_ring_with_center_site() {
    let layout = Voronoi::<[f64; 2]>::new().with_size([10.0, 10.0]).unwrap();
    let mut points = ring(12, 3.0, 0.1);
    points.push([5.0, 5.0]);

    let polygons = layout.polygons(&points).unwrap();
    let total: f64 = polygons.iter().map(|p| p.area()).sum();
    assert!((total - 100.0).abs() < 1e-6, "Total area {}", total);

    // The center cell is a regular dodecagon bounded by the ring sites only.
    let center = &polygons[12];
    assert_eq!(center.len(), 12);
    assert!(center.edge_neighbors().iter().all(|&n| (0..12).contains(&n)));
}

#[test]
fn test_links_on_cocircular_input() {
    let layout = Voronoi::<[f64; 2]>::new();
    let points = ring(6, 2.0, 0.0);
    let links = layout.links(&points).unwrap();

    // Every hull edge is a link; the interior diagonals depend on tie breaking.
    for k in 0..6 {
        let (a, b) = (k, (k + 1) % 6);
        assert!(
            links.iter().any(|l| (l.source == a && l.target == b) || (l.source == b && l.target == a)),
            "Missing hull link {} - {}",
            a,
            b
        );
    }
}

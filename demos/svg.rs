use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use vorotwo::{BoundingBox, Voronoi, random_points};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_example("2d_voronoi_random.svg", 0, false)?;
    run_example("2d_voronoi_relaxed.svg", 5, false)?;
    run_example("2d_voronoi_delaunay.svg", 0, true)?;
    Ok(())
}

fn run_example(filename: &str, iterations: usize, delaunay: bool) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);
    let layout = Voronoi::<[f64; 2]>::new().with_extent(bounds.min, bounds.max)?;

    let mut rng = StdRng::seed_from_u64(123456789);
    let generators = random_points(&bounds, 1000, &mut rng);
    let generators = layout.relax(&generators, iterations)?;

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)],
        BLACK.stroke_width(2),
    )))?;

    // Draw cells
    for polygon in layout.polygons(&generators)? {
        if polygon.len() < 3 {
            continue;
        }

        let mut poly: Vec<(f64, f64)> = polygon.points().map(|p| (p[0], p[1])).collect();

        chart.draw_series(std::iter::once(Polygon::new(
            poly.clone(),
            BLUE.mix(0.1).filled(),
        )))?;

        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(
            poly,
            BLACK.mix(0.5),
        )))?;
    }

    if delaunay {
        for link in layout.links(&generators)? {
            let a = generators[link.source];
            let b = generators[link.target];
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(a[0], a[1]), (b[0], b[1])],
                GREEN.mix(0.6),
            )))?;
        }
    }

    // Draw generators
    chart.draw_series(generators.iter().map(|p| Circle::new((p[0], p[1]), 2, RED.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}

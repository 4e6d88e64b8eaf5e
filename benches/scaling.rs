use criterion::{criterion_group, Criterion, BenchmarkId};
use vorotwo::{BoundingBox, Site, Voronoi, compute_voronoi, random_points};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::Command;

#[derive(Deserialize)]
struct Estimates {
    mean: Stats,
}

#[derive(Deserialize)]
struct Stats {
    point_estimate: f64,
}

const SIZES: [usize; 6] = [10, 100, 1000, 10_000, 100_000, 1_000_000];

fn benchmark_scaling(c: &mut Criterion) {
    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);
    let layout = Voronoi::<[f64; 2]>::new().with_extent(bounds.min, bounds.max).unwrap();

    let mut group = c.benchmark_group("scaling");
    group.sample_size(10);

    for &size in &SIZES {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let points = random_points(&bounds, size, &mut rng);
        let sites = Site::from_points(&points);
        println!("N: {:7}, Mean spacing: {:.4}", size, 100.0 / (size as f64).sqrt());

        group.bench_with_input(BenchmarkId::new("sweep", size), &sites, |b, s| {
            b.iter(|| compute_voronoi(s, None))
        });

        group.bench_with_input(BenchmarkId::new("clipped", size), &sites, |b, s| {
            b.iter(|| compute_voronoi(s, Some(&bounds)))
        });

        group.bench_with_input(BenchmarkId::new("polygons", size), &points, |b, p| {
            b.iter(|| layout.polygons(p).unwrap())
        });
    }
    group.finish();
}

/// Mean time in milliseconds per size, read from criterion's estimates.
fn read_series(root: &Path, method: &str) -> Result<Vec<(f64, f64)>, Box<dyn std::error::Error>> {
    let mut points = Vec::new();
    for &size in &SIZES {
        let path = root.join(method).join(size.to_string()).join("base/estimates.json");
        if !path.exists() {
            continue;
        }
        let estimates: Estimates = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
        points.push((size as f64, estimates.mean.point_estimate / 1e6));
    }
    Ok(points)
}

fn plot_scaling_results() -> Result<(), Box<dyn std::error::Error>> {
    let root = Path::new("target/criterion/scaling");
    if !root.exists() {
        return Ok(());
    }

    let mut data = BTreeMap::new();
    for method in ["sweep", "clipped", "polygons"] {
        let points = read_series(root, method)?;
        if !points.is_empty() {
            data.insert(method, points);
        }
    }
    let Some(&(n0, t0)) = data.get("sweep").and_then(|s| s.first()) else {
        return Ok(());
    };

    let output = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output()?;
    let git_hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let out_dir = Path::new("benches/results");
    std::fs::create_dir_all(out_dir)?;
    let out_file = out_dir.join(format!("bench_scaling_{}.png", git_hash));

    let area = BitMapBackend::new(&out_file, (1024, 768)).into_drawing_area();
    area.fill(&WHITE)?;

    let times = data.values().flatten().map(|p| p.1);
    let min_t = times.clone().fold(f64::INFINITY, f64::min);
    let max_t = times.fold(f64::NEG_INFINITY, f64::max);
    let max_n = SIZES[SIZES.len() - 1] as f64;

    let mut chart = ChartBuilder::on(&area)
        .caption("Sweep scaling", ("sans-serif", 40).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((SIZES[0] as f64..max_n).log_scale(), (min_t * 0.5..max_t * 2.0).log_scale())?;
    chart.configure_mesh().x_desc("Number of sites (N)").y_desc("Time (ms)").draw()?;

    // N log N reference through the first sweep measurement.
    let reference = SIZES.iter().map(|&n| {
        let n = n as f64;
        (n, t0 * (n * n.ln()) / (n0 * n0.ln().max(1.0)))
    });
    chart
        .draw_series(LineSeries::new(reference, BLACK.mix(0.4)))?
        .label("N log N")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.4)));

    for (i, (method, points)) in data.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(*method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
    }

    chart.configure_series_labels().background_style(WHITE.mix(0.8)).border_style(BLACK).draw()?;
    println!("Plot saved to {:?}", out_file);
    Ok(())
}

criterion_group!(benches, benchmark_scaling);

fn main() {
    benches();
    if let Err(e) = plot_scaling_results() {
        eprintln!("Error generating plot: {}", e);
    }
}
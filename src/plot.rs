use plotters::prelude::*;
use std::path::Path;

use crate::error::{KnnError, Result};
use crate::experiment::ExperimentSummary;

const SIZE: (u32, u32) = (800, 480);

/// Draws mean accuracy and unanimity rate against k as an SVG line chart.
pub fn accuracy_chart(path: impl AsRef<Path>, results: &[(usize, ExperimentSummary)]) -> Result<()> {
    draw(path.as_ref(), results).map_err(|e| KnnError::Plot(e.to_string()))
}

fn series(
    results: &[(usize, ExperimentSummary)],
    metric: impl Fn(&ExperimentSummary) -> Option<f64>,
) -> Vec<(f64, f64)> {
    results
        .iter()
        .filter_map(|(k, summary)| metric(summary).map(|value| (*k as f64, value)))
        .collect()
}

fn draw(
    path: &Path,
    results: &[(usize, ExperimentSummary)],
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let accuracy = series(results, ExperimentSummary::mean_accuracy);
    let unanimity = series(results, ExperimentSummary::mean_unanimity_rate);

    let k_min = results.iter().map(|(k, _)| *k).min().unwrap_or(1) as f64;
    let k_max = results.iter().map(|(k, _)| *k).max().unwrap_or(1) as f64;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("k-nearest-neighbor accuracy", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((k_min - 1.0)..(k_max + 1.0), 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("k")
        .y_desc("percent")
        .draw()?;

    for (name, points, color) in [("accuracy", accuracy, BLUE), ("unanimity", unanimity, RED)] {
        chart
            .draw_series(LineSeries::new(points.clone(), color))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

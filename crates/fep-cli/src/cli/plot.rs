//! SVG rendering of the per-sample energies and the per-window estimates.

use anyhow::Context;
use fep_core::estimate::{Direction, FepEstimate, ScaledSample};
use num_traits::ToPrimitive;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub(super) const SAMPLES_FILE: &str = "samples.svg";
pub(super) const DELTA_G_FILE: &str = "delta_g.svg";

const PLOT_SIZE: (u32, u32) = (1024, 768);
const BACKWARD_COLOR: RGBColor = RGBColor(230, 180, 0);

struct Series<'a> {
    label: &'a str,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

pub(super) fn render_plots(
    dir: &Path,
    samples: &[ScaledSample],
    estimate: &FepEstimate,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create plot directory '{}'", dir.display()))?;

    let samples_path = dir.join(SAMPLES_FILE);
    render_scatter(
        &samples_path,
        "Forward energy differences per sample",
        "dE (kcal/mol)",
        &[Series {
            label: "forward samples",
            color: BLUE,
            points: samples
                .iter()
                .map(|sample| (sample.x, sample.energy_kcal_mol))
                .collect(),
        }],
    )?;

    let delta_g_path = dir.join(DELTA_G_FILE);
    render_scatter(
        &delta_g_path,
        "Free-energy differences per window",
        "dG (kcal/mol)",
        &[
            Series {
                label: "forward",
                color: RED,
                points: direction_points(estimate, Direction::Forward),
            },
            Series {
                label: "backward",
                color: BACKWARD_COLOR,
                points: direction_points(estimate, Direction::Backward),
            },
        ],
    )?;

    Ok(vec![samples_path, delta_g_path])
}

fn direction_points(estimate: &FepEstimate, direction: Direction) -> Vec<(f64, f64)> {
    estimate
        .direction(direction)
        .iter()
        .filter_map(|(window, value)| Some((window.value(), value.to_f64()?)))
        .collect()
}

fn render_scatter(
    path: &Path,
    caption: &str,
    y_desc: &str,
    series: &[Series<'_>],
) -> anyhow::Result<()> {
    let all_points = || series.iter().flat_map(|entry| entry.points.iter());
    let x_range = padded_range(all_points().map(|point| point.0));
    let y_range = padded_range(all_points().map(|point| point.1));

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("reaction coordinate")
        .y_desc(y_desc)
        .draw()?;

    for entry in series {
        let color = entry.color;
        chart
            .draw_series(
                entry
                    .points
                    .iter()
                    .map(move |&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?
            .label(entry.label)
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write plot '{}'", path.display()))?;
    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });

    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    let padding = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - padding)..(max + padding)
}

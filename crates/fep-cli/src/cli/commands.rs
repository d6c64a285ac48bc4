use super::CliError;
use super::config::{OutputFormat, RunConfig};
use super::plot;
use anyhow::Context;
use bigdecimal::BigDecimal;
use fep_core::domain::WindowSet;
use fep_core::estimate::{Direction, EstimateReport, FepEstimate, estimate, scaled_forward_samples};
use fep_core::extract::extract_windows;
use num_traits::ToPrimitive;
use std::io::{self, Write};
use tracing::{info, warn};

pub(super) fn run_analysis(config: &RunConfig) -> Result<i32, CliError> {
    info!(
        path = %config.results_path.display(),
        energy_column = config.energy_column,
        "reading results file"
    );
    let windows = extract_windows(&config.results_path, config.energy_column)?;
    if windows.is_empty() {
        warn!(path = %config.results_path.display(), "results file contains no sample records");
    }

    let result = estimate(&windows)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Table => {
            write_table(&mut out, &windows, &result).context("failed to write report")?
        }
        OutputFormat::Json => {
            let report = EstimateReport::new(&windows, &result);
            let json = report
                .to_json_pretty()
                .context("failed to serialize report")?;
            writeln!(out, "{json}").context("failed to write report")?;
        }
    }

    if let Some(plot_dir) = &config.plot_dir {
        let samples = scaled_forward_samples(&windows);
        for path in plot::render_plots(plot_dir, &samples, &result)? {
            info!(path = %path.display(), "wrote plot");
        }
    }

    Ok(0)
}

fn write_table<W: Write>(out: &mut W, windows: &WindowSet, result: &FepEstimate) -> io::Result<()> {
    writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10} {:>18} {:>18}",
        "window", "before", "this", "after", "forward(kcal/mol)", "backward(kcal/mol)"
    )?;
    for (window, bucket) in windows.iter() {
        writeln!(
            out,
            "{:<12} {:>10} {:>10} {:>10} {:>18} {:>18}",
            window.label(),
            bucket.before.len(),
            bucket.this.len(),
            bucket.after.len(),
            format_delta_g(result.forward().get(window)),
            format_delta_g(result.backward().get(window)),
        )?;
    }
    writeln!(
        out,
        "Forward sum: {}",
        format_delta_g(Some(&result.total(Direction::Forward)))
    )?;
    writeln!(
        out,
        "Backward sum: {}",
        format_delta_g(Some(&result.total(Direction::Backward)))
    )
}

fn format_delta_g(value: Option<&BigDecimal>) -> String {
    match value.and_then(|value| value.to_f64()) {
        Some(value) => format!("{value:.6}"),
        None => "-".to_string(),
    }
}

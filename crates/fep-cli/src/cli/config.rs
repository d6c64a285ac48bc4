use super::Cli;
use std::path::PathBuf;

/// Everything one analysis run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RunConfig {
    pub(super) results_path: PathBuf,
    pub(super) energy_column: usize,
    pub(super) plot_dir: Option<PathBuf>,
    pub(super) output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OutputFormat {
    Table,
    Json,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            results_path: cli.results_file,
            energy_column: cli.energy_column,
            plot_dir: cli.plot_dir,
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Table
            },
        }
    }
}

mod commands;
mod config;
mod logging;
mod plot;

use clap::Parser;
use config::RunConfig;
use fep_core::domain::FepError;
use fep_core::extract::DEFAULT_ENERGY_COLUMN;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    match run(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned())) {
        Ok(code) => code,
        Err(error) => {
            let compatibility_error = error.as_fep_error();
            eprintln!("{}", compatibility_error.diagnostic_line());
            if let Some(summary_line) = compatibility_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            compatibility_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::setup_logging(cli.verbose, cli.quiet)?;
            commands::run_analysis(&RunConfig::from(cli))
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dock-fep",
    version,
    about = "Free-energy perturbation estimates along a reaction coordinate"
)]
struct Cli {
    /// Results file with one single-point record per line
    #[arg(value_name = "RESULTS_FILE")]
    results_file: PathBuf,

    /// Zero-based column holding the energy in Hartree
    #[arg(long, value_name = "INDEX", default_value_t = DEFAULT_ENERGY_COLUMN)]
    energy_column: usize,

    /// Write samples.svg and delta_g.svg into this directory
    #[arg(long, value_name = "DIR")]
    plot_dir: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(FepError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FepError> for CliError {
    fn from(error: FepError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_fep_error(&self) -> FepError {
        match self {
            Self::Usage(message) => FepError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => FepError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

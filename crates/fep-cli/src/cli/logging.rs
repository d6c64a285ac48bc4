use super::CliError;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Install the stderr subscriber. `RUST_LOG` wins over `-v` unless `-q` is set.
pub(super) fn setup_logging(verbosity: u8, quiet: bool) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !quiet => filter,
        _ => EnvFilter::default().add_directive(level_filter(verbosity, quiet).into()),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|error| {
            CliError::Internal(anyhow::anyhow!("failed to install log subscriber: {error}"))
        })
}

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::level_filter;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
    }
}

use env_logger::{Builder, Target};
use log::LevelFilter;

pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. The environment is not consulted, only the command line flags.
pub fn setup_logging(verbosity: u8, quiet: bool) {
    Builder::new()
        .filter_level(level_filter(verbosity, quiet))
        .format_target(false)
        .target(Target::Stderr)
        .init();
}

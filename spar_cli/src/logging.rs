use log::LevelFilter;

/// Map `-v`/`-q` flags to a level: warnings by default, off when quiet.
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

/// Install the stderr logger. `RUST_LOG` overrides the flag-derived level.
pub fn setup_logging(verbosity: u8, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(verbosity, quiet))
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}

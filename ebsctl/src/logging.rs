use log::LevelFilter;

/// Initialise the global logger on stderr.
///
/// stdout is reserved for dry-run reports. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

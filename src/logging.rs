use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the verbosity count.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    // A second init (e.g. from tests) is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so they never
/// mix with the conversion output on stdout.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug over warn.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cambia_dietas_rs={}", default_level)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

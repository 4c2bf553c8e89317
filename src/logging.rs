use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// Honors `RUST_LOG` (default `info`). Output goes to stderr so JSON
/// written to stdout stays machine-readable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

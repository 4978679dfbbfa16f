use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing to stderr. Stdout is reserved for JSON output, so logs
/// never mix with machine-readable results. `RUST_LOG` overrides the default
/// filter.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reducto=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber for a host embedding the oracle.
///
/// Filtering follows the `RUST_LOG` environment variable, defaulting to
/// `info` so key registrations, rotations, and pause transitions are visible
/// out of the box.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

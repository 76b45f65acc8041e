use tracing_subscriber::EnvFilter;

/// Install the global log subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`. Records from the `log` macros
/// used across the backend are forwarded to the same subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

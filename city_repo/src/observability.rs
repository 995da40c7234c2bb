use tracing_subscriber::EnvFilter;

/// Installs the process wide subscriber.
///
/// Output goes to stderr so stdout only ever carries the listing. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

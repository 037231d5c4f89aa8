use tracing_subscriber::EnvFilter;

/// Initialize tracing on stderr.
///
/// The filter comes from `RUST_LOG` and falls back to `info`; stdout stays
/// free for `--print` and for the HTTP Client's own output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

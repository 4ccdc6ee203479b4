use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber for the binaries.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this crate.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("connect_four_rl={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

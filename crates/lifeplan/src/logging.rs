use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stderr, keeping stdout free for rendered output.
///
/// `RUST_LOG` takes precedence over the `--log-level` flag when set.
pub fn init_logging(log_level: &str) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr so that stdout only carries command output. Filtering follows `RUST_LOG`,
/// falling back to `info`.
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder().with_default_directive(Level::INFO.into()).from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;
    Ok(())
}

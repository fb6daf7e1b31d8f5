use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global structured-logging subscriber.
///
/// `RUST_LOG` in the environment wins; otherwise the crate logs at `config.rust_log`.
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!(
        "Punchline v{} ready (model: {})",
        env!("CARGO_PKG_VERSION"),
        config.model
    );
    Ok(())
}

fn default_filter(config: &Config) -> EnvFilter {
    EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
}

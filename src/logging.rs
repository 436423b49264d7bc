use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG` and
/// defaulting to `info`. Rocket's own `log` records go through it as well.
///
/// Returns `false` if a subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).try_init().is_ok()
}

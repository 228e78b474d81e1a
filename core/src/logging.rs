use tracing_subscriber::EnvFilter;

/// Default filter when neither an explicit filter nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a fmt subscriber for the core's `tracing` events.
///
/// `filter` takes `RUST_LOG` syntax (e.g. `"o2supply_compute=debug"`).
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(filter: Option<String>) -> bool {
    let filter = build_filter(filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

fn build_filter(filter: Option<String>) -> EnvFilter {
    match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

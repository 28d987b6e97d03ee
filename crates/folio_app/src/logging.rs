//! Subscriber setup for native runs (tests, headless tools)

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber; `RUST_LOG` wins over `default_filter`
///
/// Returns false if a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|err| {
            eprintln!("Invalid log filter {default_filter:?} ({err}), using info");
            EnvFilter::new("info")
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

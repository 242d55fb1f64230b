//! Host plumbing for running the order mapper outside a webhook dispatcher.

use tracing_subscriber::EnvFilter;

pub mod driver;
pub mod metrics;

pub use driver::{run_lines, DriverConfig, InvalidPolicy, RunSummary};

/// Install the global fmt subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

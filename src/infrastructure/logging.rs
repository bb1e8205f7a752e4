//! Logging system initialization.
//!
//! The extraction engine only emits `tracing` events; installing a
//! subscriber is left to the embedding application. This helper covers the
//! bundled binaries and tests. Console output only: this subsystem owns no
//! files.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber with `RUST_LOG`-style filtering,
/// defaulting to `info`. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_logging();
        init_logging();
    }
}

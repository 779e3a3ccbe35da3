//! Shared test utilities.

use tracing_subscriber::{fmt, EnvFilter};

/// Per-test tracing subscriber, scoped to the test thread via the guard.
/// Enable output with e.g. `RUST_LOG=navroute=debug cargo test`.
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        Self {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}

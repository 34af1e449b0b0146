//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// Respects `RUST_LOG` when set; otherwise logs the analyst crates at
/// `info` and everything else at `warn`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,analyst_core=info,analyst_llm=info,analyst_cli=info")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Tracing setup shared by both executables.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "bank_directory=debug,tower_http=debug";

/// Installs the global subscriber: `RUST_LOG` env filter plus the fmt layer.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

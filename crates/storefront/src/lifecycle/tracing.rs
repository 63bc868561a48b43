//! # Tracing Setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the configured level
//! when set:
//!
//! ```bash
//! RUST_LOG=debug storefront search gold ring   # every actor command and HTTP call
//! storefront --log-format json browse          # one JSON object per event
//! ```
//!
//! Spans come from `#[instrument]` on the repository and actor clients, so a search
//! logs as `set_query:record` with the term attached. Actor events carry an `actor`
//! field (`SearchHistory`, `ResponseCache`) instead of a module path.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Installs the subscriber for the whole process. Fails if one is already installed.
pub fn setup_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.trim()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Compact => builder.compact().finish().try_init(),
        LogFormat::Pretty => builder.pretty().finish().try_init(),
        LogFormat::Json => builder.json().finish().try_init(),
    }
}

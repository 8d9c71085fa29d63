//! Utility functions for configuration and model loading.
//!
//! This module provides metadata file helpers and logging setup.

pub mod metadata;

pub use metadata::{read_metadata_json, require_key};

/// Initializes the tracing subscriber for logging.
///
/// Installs a `RUST_LOG`-filtered formatting subscriber. The serving process
/// calls this once at startup; later calls leave the existing subscriber in place.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let installed = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

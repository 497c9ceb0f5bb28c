//! Tracing subscriber setup shared by hosts embedding the relay.

use tracing_subscriber::EnvFilter;

use crate::error::RelayError;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "relay_engine=info,relay_notifier=info";

/// Install a global `fmt` subscriber honouring `RUST_LOG`.
///
/// Returns an error if a global subscriber is already installed, so hosts
/// with their own logging setup can ignore the result.
pub fn init_tracing(json: bool) -> Result<(), RelayError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| RelayError::Config(format!("Failed to install tracing subscriber: {}", e)))
}

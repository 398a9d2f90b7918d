//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize the global tracing subscriber from the configured log level
///
/// Safe to call once per process; later calls are ignored so tests that
/// build the app repeatedly do not panic.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.service.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();

    if result.is_ok() {
        tracing::info!(service = %config.service.name, "tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        let config = Config::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}

//! Subscriber setup for embedders without their own `tracing` pipeline.

use tracing_subscriber::EnvFilter;

use crate::config::HooksConfig;

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "SERVICE_HOOKS_LOG";

/// Install a fmt subscriber. `SERVICE_HOOKS_LOG` wins over `config.log_filter`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(config: &HooksConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let config = HooksConfig::default();
        // Another test binary thread may have installed one already.
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}

//! `tracing` subscriber setup

use crate::config::CliConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the log filter: `RUST_LOG` when set, otherwise the verbosity level.
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_directive()))
}

/// Install a stderr fmt subscriber. Later calls are no-ops.
pub fn init(config: &CliConfig) {
    // A subscriber already installed (tests, embedding) keeps running.
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color.should_color())
                .with_target(false),
        )
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;

    #[test]
    fn test_filter_follows_verbosity() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = CliConfig::new().with_verbosity(Verbosity::Debug);
        assert_eq!(env_filter(&config).to_string(), "debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = CliConfig::new();
        init(&config);
        init(&config);
    }
}

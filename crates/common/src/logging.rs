//! Logging and tracing initialization.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LoggingConfig;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Calling this twice is
/// harmless; the second subscriber is discarded.
pub fn init_logging(config: &LoggingConfig) {
    let registry = Registry::default().with(env_filter(&config.level));

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    }
}

/// Route logs through the test harness's captured output.
pub fn init_test_logging() {
    let _ = Registry::default()
        .with(env_filter("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

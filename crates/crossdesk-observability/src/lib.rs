//! # crossdesk-observability
//!
//! Console tracing setup for the crossdesk API.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging.
///
/// - Log level comes from `LOG_LEVEL` (default `info`); `RUST_LOG` wins
///   when set.
/// - Noisy dependencies are filtered to `warn`.
/// - Compact format with targets, file and line numbers.
pub fn init_logging(crate_name: &str) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},tower_http=warn,hyper=warn,sqlx=warn,axum::rejection=trace",
            crate_name, log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();
}

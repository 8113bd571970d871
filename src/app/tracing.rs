use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output format used when `RUST_LOG_FORMAT` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn from_env(default: LogFormat) -> Self {
        match std::env::var("RUST_LOG_FORMAT") {
            Ok(v) if v == "json" => Self::Json,
            Ok(_) => Self::Pretty,
            Err(_) => default,
        }
    }
}

/// Initialize the tracing subscriber.
/// Uses JSON format when `RUST_LOG_FORMAT=json`, human-readable for any other value.
pub fn init_tracing(default: LogFormat) {
    if LogFormat::from_env(default) == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
            .init();
    }
}

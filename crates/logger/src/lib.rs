use std::{env::var, io};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Stdout is reserved for the JSON report, so
/// every log line goes to stderr.
pub fn init() {
    initialize_tracing(LevelFilter::WARN);
}

/// Initialize tracing subscriber with the given default level.
///
/// `RUST_LOG` overrides the level, `RUST_LOG_FORMAT=json` switches to JSON lines.
fn initialize_tracing(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT").unwrap_or_default();

    let log_layer = match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(env_filter)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_writer(io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    // A second call (tests driving several runs in one process) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(log_layer).try_init();
}

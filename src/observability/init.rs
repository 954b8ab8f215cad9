//! Subscriber setup: `tracing` → OpenTelemetry → JSON-lines file.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name stamped on every exported span.
pub const SERVICE_NAME: &str = "OmniSearch";

/// Installs the global subscriber.
///
/// Spans pass through an [`EnvFilter`] built from `config.trace_level` and
/// are exported to `omnisearch-traces.jsonl` in the data directory.
///
/// Observability is optional: if the data directory cannot be created the
/// call does nothing. Only the first successful call in a process
/// takes effect.
///
/// # Example
///
/// ```no_run
/// use omnisearch::observability::init_tracing;
/// use omnisearch::Config;
///
/// init_tracing(&Config {
///     trace_level: "omnisearch=debug".to_string(),
///     ..Config::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(paths::get_data_dir()).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let provider = exporter::file_tracer_provider(paths::trace_file(), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}

//! Subscriber setup wiring `tracing` into the span buffer.

use super::buffer::SpanBuffer;
use super::span_formatter::SCOPE_NAME;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::sync::OnceLock;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static SPAN_BUFFER: OnceLock<SpanBuffer> = OnceLock::new();

/// Installs the global subscriber and returns the buffer spans are exported into.
///
/// The filter comes from `config.trace_level` (default `"info"`), in `EnvFilter`
/// directive syntax, so `"placesheet=debug"` works too. Only the first call
/// installs anything; later calls return the same buffer. If another subscriber is
/// already installed the buffer simply stays empty.
///
/// # Example
///
/// ```rust
/// use placesheet::observability::init_tracing;
/// use placesheet::Config;
///
/// let config = Config { trace_level: Some("debug".to_string()), ..Default::default() };
/// let spans = init_tracing(&config);
///
/// tracing::debug_span!("page_load").in_scope(|| tracing::debug!("listing rendered"));
/// for line in spans.drain() {
///     println!("{line}");
/// }
/// ```
pub fn init_tracing(config: &Config) -> SpanBuffer {
    SPAN_BUFFER
        .get_or_init(|| {
            let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
            let buffer = SpanBuffer::default();

            let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SCOPE_NAME)]);
            let provider = tracer::create_tracer_provider(buffer.clone(), resource);
            let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

            let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
            if tracing_subscriber::registry().with(filter).with(otel_layer).try_init().is_err() {
                tracing::debug!("a global subscriber is already installed");
            }
            buffer
        })
        .clone()
}

/// The buffer installed by [`init_tracing`], if tracing was initialized.
#[must_use]
pub fn span_buffer() -> Option<SpanBuffer> {
    SPAN_BUFFER.get().cloned()
}

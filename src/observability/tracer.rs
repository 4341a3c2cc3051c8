//! Tracer provider whose exporter writes OTLP JSON lines into a [`SpanBuffer`].

use super::buffer::SpanBuffer;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exports each batch as a single OTLP JSON line.
#[derive(Debug)]
struct BufferSpanExporter {
    buffer: SpanBuffer,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl SpanExporter for BufferSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        if !batch.is_empty() {
            let line = self.formatter.format_batch(&batch).to_string();
            self.buffer.push_line(line);
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        self.formatter = SpanFormatter::new(res.clone());
    }
}

/// Builds a provider that exports every finished span into `buffer` immediately.
pub fn create_tracer_provider(buffer: SpanBuffer, resource: Resource) -> TracerProvider {
    let exporter = BufferSpanExporter {
        buffer,
        formatter: SpanFormatter::new(resource.clone()),
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

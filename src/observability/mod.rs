//! OpenTelemetry tracing exported into an in-memory buffer.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK TracerProvider → BufferSpanExporter → SpanBuffer
//! ```
//!
//! The page has no file system and no collector of its own, so finished spans are
//! kept as OTLP JSON lines in a bounded [`SpanBuffer`]. The host decides what to do
//! with them: log them, post them somewhere, or ignore them.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation
//! - `tracer`: Tracer provider with the buffer exporter
//! - `span_formatter`: OTLP JSON encoding
//! - [`buffer`]: The bounded line buffer

pub mod buffer;
pub mod init;
mod span_formatter;
mod tracer;

pub use buffer::SpanBuffer;
pub use init::{init_tracing, span_buffer};

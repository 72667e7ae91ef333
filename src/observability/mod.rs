//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → FileSpanExporter → pantry-otlp.json
//! ```
//!
//! Spans are written as OTLP JSON, one export batch per line, to
//! `~/.local/share/zellij/pantry/pantry-otlp.json`. The file rotates at
//! 10 MiB and keeps three numbered backups (`.1` newest, `.3` oldest).
//!
//! The filter comes from the `trace_level` plugin option and accepts any
//! [`tracing_subscriber::EnvFilter`] directive (`debug`,
//! `pantry=trace,warn`, ...). Without it the level is `info`.
//!
//! Both the plugin and its worker call [`init_tracing`]; worker spans are
//! parented to the plugin's through the trace context carried in each
//! worker message.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_LEVEL, TRACE_FILE};

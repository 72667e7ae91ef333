//! Tracer provider that exports spans to a local file.
//!
//! Plugins run sandboxed without network access, so spans go through a
//! [`SpanExporter`] that appends OTLP JSON lines to a rotating file instead
//! of an OTLP endpoint.

use super::file_writer::RotatingFile;
use super::span_formatter::OtlpJsonFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    formatter: OtlpJsonFormatter,
    stopped: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let line = self.formatter.format_batch(&batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(format!("writing trace file: {e}")))
        };

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a provider whose spans land in `file_path`, one batch per line.
///
/// Spans are exported as soon as they end; there is no batching thread in
/// the WASI sandbox.
pub fn file_tracer_provider(file_path: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(file_path),
        formatter: OtlpJsonFormatter::new(resource.clone(), scope),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

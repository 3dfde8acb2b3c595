use crate::utils::metrics::{Method, Metrics, Status};
use anyhow::{Context as _, Result};
use opentelemetry::{
    Context, KeyValue, global,
    global::BoxedTracer,
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider, trace::SdkTracerProvider,
};
use tokio::time::Instant;
use tracing::{error, info};

/// OTLP exporters for traces, metrics and logs, installed as the global
/// providers.
pub struct Telemetry {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
    logger_provider: SdkLoggerProvider,
}

impl Telemetry {
    pub fn init(service_name: impl Into<String>, otel_endpoint: &str) -> Result<Self> {
        let resource = Resource::builder()
            .with_service_name(service_name.into())
            .build();

        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create span exporter")?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(resource.clone())
            .with_batch_exporter(span_exporter)
            .build();

        global::set_tracer_provider(tracer_provider.clone());

        let metric_exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create metric exporter")?;

        let meter_provider = SdkMeterProvider::builder()
            .with_resource(resource.clone())
            .with_periodic_exporter(metric_exporter)
            .build();

        global::set_meter_provider(meter_provider.clone());

        let log_exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create log exporter")?;

        let logger_provider = SdkLoggerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(log_exporter)
            .build();

        Ok(Self {
            tracer_provider,
            meter_provider,
            logger_provider,
        })
    }

    pub fn logger_provider(&self) -> &SdkLoggerProvider {
        &self.logger_provider
    }

    pub fn shutdown(self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracer_provider.shutdown() {
            errors.push(format!("tracer provider: {e}"));
        }
        if let Err(e) = self.meter_provider.shutdown() {
            errors.push(format!("meter provider: {e}"));
        }
        if let Err(e) = self.logger_provider.shutdown() {
            errors.push(format!("logger provider: {e}"));
        }

        if !errors.is_empty() {
            anyhow::bail!("Failed to shutdown providers:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}

/// A span opened for one service operation, plus its start time for the
/// duration metric.
pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

impl TracingContext {
    pub fn start(tracer: &BoxedTracer, operation_name: &str, attributes: Vec<KeyValue>) -> Self {
        let start_time = Instant::now();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        Self { cx, start_time }
    }

    pub fn complete_success(&self, metrics: &Metrics, method: Method, message: &str) {
        self.complete(metrics, method, true, message);
    }

    pub fn complete_error(&self, metrics: &Metrics, method: Method, message: &str) {
        self.complete(metrics, method, false, message);
    }

    fn complete(&self, metrics: &Metrics, method: Method, is_success: bool, message: &str) {
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };
        let elapsed = self.start_time.elapsed().as_secs_f64();

        self.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        metrics.record(method, status, elapsed);

        self.cx.span().end();
    }
}

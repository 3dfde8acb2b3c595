use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking::{self, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

/// Installs the global subscriber. Keep the returned guard alive for the
/// lifetime of the process, dropping it flushes the file writer.
pub fn init_logger(
    sdk_logger_provider: Option<&SdkLoggerProvider>,
    component: &str,
    is_dev: bool,
    enable_file: bool,
) -> Option<WorkerGuard> {
    let (file_layer, guard) = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(true)
        .with_filter(console_filter);

    let otel_layer = sdk_logger_provider.map(|provider| {
        let otel_filter = ["hyper", "opentelemetry", "tonic", "h2", "reqwest"]
            .iter()
            .filter_map(|target| format!("{target}=off").parse::<Directive>().ok())
            .fold(EnvFilter::new("info"), EnvFilter::add_directive);

        OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();

    guard
}

use crate::config::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: fmt output always, OTLP span export when
/// an endpoint is configured. Keep the returned provider alive and shut it
/// down on exit so batched spans are flushed.
pub fn init(config: &Config) -> anyhow::Result<Option<SdkTracerProvider>> {
    let provider = match &config.otlp_endpoint {
        Some(endpoint) => {
            let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint.clone())
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to create OTLP exporter: {}", e))?;
            Some(
                SdkTracerProvider::builder()
                    .with_batch_exporter(otlp_exporter)
                    .build(),
            )
        }
        None => None,
    };

    let telemetry = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer("profile-dashboard"))
    });
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(telemetry)
        .with(fmt_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(provider)
}

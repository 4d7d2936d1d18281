//! Tracing setup: formatted logs plus OpenTelemetry spans exported to stdout.

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "stellarmind=info,warn";

static PROVIDER: OnceLock<TracerProvider> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global tracing subscriber.
///
/// Formatted logs and exported spans both honour `RUST_LOG`, falling back to
/// `stellarmind=info,warn`. Spans carry `service.name = "stellarmind"`.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            "stellarmind",
        )]))
        .build();

    let tracer = provider.tracer("stellarmind");

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(env_filter());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    opentelemetry::global::set_tracer_provider(provider.clone());
    let _ = PROVIDER.set(provider);
    Ok(())
}

/// Flush pending spans and stop exporting.
///
/// Safe to call when [`init_telemetry`] was never called.
pub fn shutdown_telemetry() {
    if let Some(provider) = PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Telemetry shutdown failed");
        }
    }
    opentelemetry::global::shutdown_tracer_provider();
}

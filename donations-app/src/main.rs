//! # Donations Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the gateway adapter
//! - Create the donation service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use donations_gateway::HttpGateway;
use donations_hex::{DonationService, inbound::HttpServer};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("donations-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing when an exporter endpoint is set
    let otel = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => Some(init_tracer(endpoint)?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,donations_app=debug,donations_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting donations server on port {}", config.port);
    tracing::info!(
        "Using payment gateway: {} (timeout {:?})",
        config.gateway.base_url,
        config.gateway.timeout
    );

    let missing = config.settings.missing();
    if !missing.is_empty() {
        tracing::warn!(
            ?missing,
            "Gateway credentials incomplete; payment requests will fail until they are set"
        );
    }

    // Build the gateway adapter
    let gateway = HttpGateway::new(config.gateway.clone())?;

    // Create the donation service
    let mut service = DonationService::new(gateway, config.settings.clone());
    if let Some(site_url) = &config.public_site_url {
        service = service.with_default_origin(site_url.clone());
    }

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}

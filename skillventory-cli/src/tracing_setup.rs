//! Log output for the skillventory CLI
//!
//! Console logging is always on. With `--otel` and the `telemetry` feature,
//! spans are also exported over OTLP; if the exporter cannot be built the
//! console layer is installed alone and a warning is logged.
//!
//! Environment variables:
//!   RUST_LOG                      # Log filter, overrides --debug
//!   OTEL_EXPORTER_OTLP_ENDPOINT   # default: http://localhost:4317
//!   OTEL_SERVICE_NAME             # default: skillventory

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const DEBUG_FILTER: &str = "skillventory=debug,skillventory_server=debug,tower_http=debug,info";

/// Global logging flags
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub otel: bool,
}

impl TracingConfig {
    fn default_directives(&self) -> &'static str {
        if self.debug {
            DEBUG_FILTER
        } else {
            DEFAULT_FILTER
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

/// Install the global subscriber.
///
/// Only fails when a subscriber is already installed.
pub fn init(config: &TracingConfig) -> Result<()> {
    let console = tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt::layer().with_target(config.debug).compact());

    #[cfg(feature = "telemetry")]
    if config.otel {
        match otlp::layer() {
            Ok((layer, endpoint)) => {
                console.with(layer).try_init()?;
                tracing::info!(%endpoint, "exporting spans over OTLP");
            }
            Err(err) => {
                console.try_init()?;
                tracing::warn!(error = %err, "OTLP export disabled");
            }
        }
        return Ok(());
    }

    console.try_init()?;
    if config.otel {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }
    Ok(())
}

/// Flush pending spans before exit.
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

#[cfg(feature = "telemetry")]
mod otlp {
    use anyhow::{Context, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use opentelemetry_sdk::{runtime, Resource};
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    /// Span layer plus the endpoint it exports to.
    pub fn layer<S>() -> Result<(OpenTelemetryLayer<S, Tracer>, String)>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_string());
        let service_name =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "skillventory".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .with_context(|| format!("building OTLP exporter for {endpoint}"))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(Resource::new([KeyValue::new("service.name", service_name)]))
            .build();
        let tracer = provider.tracer("skillventory");
        // The global handle keeps the provider alive until shutdown
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok((tracing_opentelemetry::layer().with_tracer(tracer), endpoint))
    }
}

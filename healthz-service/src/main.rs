use healthz_service::config::HealthzConfig;
use healthz_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("healthz-service", "info");

    let config = HealthzConfig::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    // A failed connection here means the listener is never bound.
    let app = Application::build(config).await.map_err(|e| {
        tracing::error!(error = %e, "Startup aborted");
        std::io::Error::other(e.to_string())
    })?;

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!(error = %e, "Server error");
        e
    })
}

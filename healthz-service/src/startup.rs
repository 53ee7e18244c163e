use crate::config::HealthzConfig;
use crate::handlers::{self, HealthState};
use crate::services::MongoConnection;
use axum::{routing::get, Router};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const HEALTH_PATH: &str = "/healthz";

pub fn build_router(state: HealthState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Connect to MongoDB, then bind the listener. Nothing is bound if the
    /// connection cannot be established.
    pub async fn build(config: HealthzConfig) -> Result<Self, AppError> {
        let connection =
            MongoConnection::establish(&config.mongodb_uri, config.connect_timeout()).await?;

        let state = HealthState::new(Arc::new(connection), config.probe_timeout());
        Self::build_with_state(state, config.app_port).await
    }

    /// Bind `port` (0 picks a free one) and serve the router over `state`.
    pub async fn build_with_state(state: HealthState, port: u16) -> Result<Self, AppError> {
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(port = port, error = %e, "Failed to start server");
            AppError::ListenError { port, source: e }
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Server is running on port");

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

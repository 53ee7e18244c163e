use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Connection error: {0}")]
    ConnectionError(anyhow::Error),

    #[error("Probe failed: {0}")]
    ProbeError(anyhow::Error),

    #[error("Listen error on port {port}: {source}")]
    ListenError {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// The underlying failure without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            AppError::ConfigError(err)
            | AppError::ConnectionError(err)
            | AppError::ProbeError(err)
            | AppError::InternalError(err) => err.to_string(),
            AppError::ListenError { source, .. } => source.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::ConnectionError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            status: &'static str,
            error: String,
        }

        let (status, label) = match self {
            AppError::ProbeError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy"),
            AppError::ConnectionError(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            AppError::ConfigError(_)
            | AppError::ListenError { .. }
            | AppError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
        };

        (
            status,
            Json(ErrorResponse {
                status: label,
                error: self.detail(),
            }),
        )
            .into_response()
    }
}

//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failures raised by the data-access layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("config: {0}")]
    Config(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("missing reference: {0}")]
    Reference(String),
    #[error("database: {0}")]
    Db(#[source] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Reference(db.message().to_string())
            }
            _ => AppError::Db(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Reference(_) => StatusCode::CONFLICT,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Detail that is safe to show to clients. Driver errors stay in the log.
    fn client_detail(&self) -> Option<String> {
        match self {
            AppError::Config(_) | AppError::Db(_) => None,
            AppError::Validation(m) | AppError::Reference(m) | AppError::BadRequest(m) => {
                Some(m.clone())
            }
        }
    }
}

/// Error payload returned by every route.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable message, fixed per route.
    #[schema(example = "Actor no encontrado")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// HTTP-facing error: status plus the route's fixed message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        ApiError {
            status,
            body: ErrorBody {
                error: error.into(),
                description: None,
            },
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.body.description = Some(description.into());
        self
    }

    /// Map a data-access failure onto the route's fixed message. Absent rows
    /// never get here: handlers turn `None` into [`ApiError::not_found`].
    pub fn from_app(err: AppError, message: &str) -> Self {
        let status = err.status();
        if status.is_server_error() {
            tracing::error!(error = %err, "{}", message);
        } else {
            tracing::warn!(error = %err, "{}", message);
        }
        let api = Self::new(status, message);
        match err.client_detail() {
            Some(detail) => api.with_description(detail),
            None => api,
        }
    }
}

/// Adapter for `map_err`: `.map_err(fail("No se pudo obtener el actor"))`.
pub fn fail(message: &'static str) -> impl FnOnce(AppError) -> ApiError {
    move |err| ApiError::from_app(err, message)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

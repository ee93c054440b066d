//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::FormRejection;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Request refused before reaching a handler, e.g. a form body with the
    /// wrong content type
    #[error("{reason}")]
    Rejected { status: StatusCode, reason: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected { status, .. } => *status,
            AppError::Database(_)
            | AppError::Store(_)
            | AppError::Serialization(_)
            | AppError::Template(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error details carried on the response until the error page is rendered.
///
/// `detail` is only shown outside production.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub message: String,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Store(msg) => tracing::error!("Store error: {}", msg),
            AppError::Serialization(e) => tracing::error!("Serialization error: {}", e),
            AppError::Template(e) => tracing::error!("Template error: {:#}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::Rejected { status, reason } => {
                tracing::debug!("Rejected request ({}): {}", status.as_u16(), reason)
            }
        }

        let page = ErrorPage {
            message: self.to_string(),
            detail: format!("{:?}", self),
        };

        // Plain body until the error page layer replaces it
        let mut response = (status, page.message.clone()).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!("Form rejected: {:?}", rejection);
        let status = rejection.into_response().status();
        AppError::Rejected {
            status,
            reason: status.canonical_reason().unwrap_or("Bad Request").to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

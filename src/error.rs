use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A request body field is missing or malformed. Body-level failures
    /// carry no field.
    #[error("{message}")]
    Validation { field: Option<&'static str>, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field: Some(field), message: message.into() }
    }

    pub fn body(message: impl Into<String>) -> Self {
        Self::Validation { field: None, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // the unique indexes catch what a racing check-then-insert lets through
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            tracing::warn!(detail = %detail, "unique constraint rejected write");
            return Self::Conflict("Movie id or name already taken".to_string());
        }
        Self::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation { field: Some(field), message } => {
                json!({ "message": { (*field): message } })
            }
            Self::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                json!({ "message": "Internal Server Error" })
            }
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

//! HTTP error mapping.
//!
//! All handlers return [`ApiResult`]; this module owns the single place
//! where domain errors become HTTP responses. 5xx-class failures are logged
//! server-side and surface to the caller with a generic message only.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use kharcha_core::auth::PasswordError;
use kharcha_core::voucher::LineBatchError;
use kharcha_db::repositories::VoucherError;
use kharcha_shared::{AppError, JwtError};

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A classified application error.
    #[error(transparent)]
    App(#[from] AppError),

    /// A validation failure with per-field detail.
    #[error("Validation error: {message}")]
    ValidationDetailed {
        /// Summary message.
        message: String,
        /// Per-field failure detail, serialized into the response body.
        details: serde_json::Value,
    },
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::App(AppError::Database(err.to_string()))
    }
}

impl From<VoucherError> for ApiError {
    fn from(err: VoucherError) -> Self {
        match err {
            VoucherError::NotFound(_) => Self::App(AppError::NotFound("Voucher not found".into())),
            VoucherError::DuplicateSerial => {
                Self::App(AppError::Conflict("Serial number already exists".into()))
            }
            VoucherError::Database(db) => Self::App(AppError::Database(db.to_string())),
        }
    }
}

impl From<LineBatchError> for ApiError {
    fn from(err: LineBatchError) -> Self {
        match err {
            LineBatchError::Empty => Self::App(AppError::Validation(
                "Voucher must contain at least one line".into(),
            )),
            LineBatchError::Invalid(errors) => Self::ValidationDetailed {
                message: "Invalid input".into(),
                details: serde_json::to_value(errors).unwrap_or_default(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationDetailed {
            message: "Invalid input".into(),
            details: serde_json::to_value(err.field_errors()).unwrap_or_default(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::App(AppError::Internal(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self::App(AppError::Internal(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let code = err.error_code();

                let message = match &err {
                    AppError::Database(_) | AppError::Internal(_) => {
                        tracing::error!(error = %err, "Internal error");
                        "An internal error occurred".to_string()
                    }
                    AppError::Unauthorized(msg)
                    | AppError::Forbidden(msg)
                    | AppError::NotFound(msg)
                    | AppError::Validation(msg)
                    | AppError::Conflict(msg) => msg.clone(),
                };

                (status, Json(json!({ "error": code, "message": message }))).into_response()
            }
            Self::ValidationDetailed { message, details } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": message,
                    "details": details,
                })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voucher_errors_classified() {
        let not_found: ApiError = VoucherError::NotFound(uuid::Uuid::new_v4()).into();
        assert!(matches!(not_found, ApiError::App(AppError::NotFound(_))));

        let conflict: ApiError = VoucherError::DuplicateSerial.into();
        assert!(matches!(conflict, ApiError::App(AppError::Conflict(_))));
    }

    #[test]
    fn test_line_batch_errors_carry_details() {
        let err: ApiError = LineBatchError::Invalid(vec![]).into();
        assert!(matches!(err, ApiError::ValidationDetailed { .. }));

        let err: ApiError = LineBatchError::Empty.into();
        assert!(matches!(err, ApiError::App(AppError::Validation(_))));
    }
}

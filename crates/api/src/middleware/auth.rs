//! Authentication middleware for protected routes.
//!
//! The bearer token carries only the principal id. The full user record,
//! including role and approval status, is reloaded from the store on every
//! request and never cached across requests.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sea_orm::ActiveEnum;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use kharcha_core::role::Role;
use kharcha_db::UserRepository;
use kharcha_db::entities::users;
use kharcha_shared::JwtError;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// The authenticated principal for the duration of one request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID.
    pub id: Uuid,
    /// Employee ID.
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Job designation.
    pub designation: String,
    /// Department.
    pub department: String,
    /// Contact number.
    pub cell_no: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Normalized role.
    pub role: Role,
    /// Approval flag.
    pub is_approved: bool,
}

impl From<users::Model> for CurrentUser {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            emp_id: user.emp_id,
            name: user.name,
            designation: user.designation,
            department: user.department,
            cell_no: user.cell_no,
            email: user.email,
            role: Role::normalize(&user.role.to_value()),
            is_approved: user.is_approved,
        }
    }
}

/// Authentication middleware that validates bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Reloads the principal from the store
/// 4. Stores a [`CurrentUser`] in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "Missing authorization header"
            })),
        )
            .into_response();
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            if !matches!(e, JwtError::Expired) {
                tracing::debug!(error = %e, "Token validation failed");
            }
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Invalid or expired token"
                })),
            )
                .into_response();
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.find_by_id(claims.user_id()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser::from(user));
            next.run(request).await
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unknown_user",
                "message": "User not found"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database error resolving principal");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// Authorization middleware for administrator-only routes.
///
/// Must be layered inside [`auth_middleware`] so the principal is already
/// resolved. Rejects with 403, distinct from the unauthenticated class.
pub async fn require_admin(request: Request, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<CurrentUser>()
        .is_some_and(|user| user.role.is_admin());

    if is_admin {
        next.run(request).await
    } else {
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Admin access required"
            })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Authentication required"
                })),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("Bearer", None)]
    #[case("", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(header), expected);
    }
}

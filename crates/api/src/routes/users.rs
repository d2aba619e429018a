//! Administrator routes for the registration approval workflow.

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use sea_orm::ActiveEnum;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::require_admin;
use crate::routes::user_profile;
use kharcha_core::role::Role;
use kharcha_db::UserRepository;
use kharcha_shared::AppError;

/// Creates the admin-only user routes. The authentication middleware is
/// layered by the caller; the admin check is layered here.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/pending", get(list_pending))
        .route("/users/{id}/approve", post(approve))
        .layer(middleware::from_fn(require_admin))
}

/// GET /users/pending - List users awaiting approval, oldest first.
async fn list_pending(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new((*state.db).clone());
    let pending = user_repo.list_pending().await?;

    let users: Vec<_> = pending.into_iter().map(user_profile).collect();
    Ok(Json(json!({ "users": users })))
}

/// POST /users/{id}/approve - Flip a pending user's approval flag.
///
/// Approving an already-approved user is an idempotent no-op. Administrator
/// accounts cannot be modified through this endpoint.
async fn approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_id(id).await? else {
        return Err(AppError::NotFound("User not found".into()).into());
    };

    if Role::normalize(&user.role.to_value()).is_admin() {
        return Err(AppError::Validation(
            "Cannot modify administrator accounts through this endpoint.".into(),
        )
        .into());
    }

    if user.is_approved {
        return Ok(Json(json!({ "user": user_profile(user) })));
    }

    let updated = user_repo.set_approved(id).await?;
    info!(user_id = %updated.id, "User registration approved");

    Ok(Json(json!({ "user": user_profile(updated) })))
}

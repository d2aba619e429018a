//! API route definitions.

use axum::{Router, middleware};
use sea_orm::ActiveEnum;

use crate::{AppState, middleware::auth::auth_middleware};
use kharcha_core::role::Role;
use kharcha_shared::UserProfile;

pub mod auth;
pub mod health;
pub mod users;
pub mod vouchers;

/// Creates the API router: public routes plus the authenticated surface.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(users::routes())
        .merge(vouchers::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Builds the sanitized profile view of a user record, with the stored role
/// normalized.
pub(crate) fn user_profile(user: kharcha_db::entities::users::Model) -> UserProfile {
    UserProfile {
        id: user.id,
        emp_id: user.emp_id,
        name: user.name,
        designation: user.designation,
        department: user.department,
        cell_no: user.cell_no,
        email: user.email,
        role: Role::normalize(&user.role.to_value()).as_str().to_string(),
        is_approved: user.is_approved,
        created_at: user.created_at.with_timezone(&chrono::Utc),
        updated_at: user.updated_at.with_timezone(&chrono::Utc),
    }
}

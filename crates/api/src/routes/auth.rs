//! Authentication routes for registration, login, profile, and password
//! reset.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::CurrentUser;
use crate::routes::user_profile;
use kharcha_core::auth::{hash_password, verify_password};
use kharcha_db::UserRepository;
use kharcha_db::entities::sea_orm_active_enums::UserRole;
use kharcha_db::repositories::NewUser;
use kharcha_shared::AppError;

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
}

/// Creates the auth routes that sit behind the authentication middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    #[validate(length(min = 1, message = "Employee ID is required"))]
    emp_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    password: String,
    #[validate(length(min = 1, message = "Designation is required"))]
    designation: String,
    #[validate(length(min = 1, message = "Department is required"))]
    department: String,
    #[validate(length(min = 4, message = "Cell number must be at least 4 characters"))]
    cell_no: String,
    #[validate(email(message = "Email must be a valid address"))]
    email: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    #[validate(length(min = 1, message = "Employee ID is required"))]
    emp_id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ForgotPasswordRequest {
    #[validate(length(min = 1, message = "Employee ID is required"))]
    emp_id: String,
    #[validate(length(min = 4, message = "Cell number must be at least 4 characters"))]
    cell_no: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    new_password: String,
}

/// POST /auth/register - Register a new, unapproved user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;

    let user_repo = UserRepository::new((*state.db).clone());

    if user_repo
        .identity_exists(&payload.emp_id, payload.email.as_deref())
        .await?
    {
        return Err(AppError::Conflict("User already exists".into()).into());
    }

    let password_hash = hash_password(&payload.password)?;

    let user = user_repo
        .create(NewUser {
            emp_id: payload.emp_id,
            name: payload.name,
            designation: payload.designation,
            department: payload.department,
            cell_no: payload.cell_no,
            email: payload.email,
            password_hash,
            role: UserRole::User,
            is_approved: false,
        })
        .await?;

    info!(user_id = %user.id, emp_id = %user.emp_id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration received. An administrator will review your account shortly."
        })),
    ))
}

/// POST /auth/login - Authenticate a user and return a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;

    let user_repo = UserRepository::new((*state.db).clone());

    // Unknown employee ID and wrong password are indistinguishable.
    let Some(user) = user_repo.find_by_emp_id(&payload.emp_id).await? else {
        info!(emp_id = %payload.emp_id, "Login attempt for unknown employee ID");
        return Err(AppError::Unauthorized("Invalid credentials".into()).into());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()).into());
    }

    if !user.is_approved {
        return Err(AppError::Forbidden(
            "Your account is awaiting administrator approval. Please try again later.".into(),
        )
        .into());
    }

    let token = state.jwt_service.generate_token(user.id)?;

    info!(user_id = %user.id, "User logged in successfully");

    Ok(Json(json!({
        "token": token,
        "user": user_profile(user)
    })))
}

/// GET /auth/me - Return the authenticated user's profile.
async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_id(current.id).await? else {
        return Err(AppError::NotFound("User not found".into()).into());
    };

    Ok(Json(json!({ "user": user_profile(user) })))
}

/// POST /auth/forgot-password - Reset a password against employee records.
async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;

    let user_repo = UserRepository::new((*state.db).clone());

    // A wrong employee ID and a wrong cell number get the same rejection, so
    // the response does not confirm which field was off.
    let matched = user_repo
        .find_by_emp_id(&payload.emp_id)
        .await?
        .filter(|user| user.cell_no == payload.cell_no);

    let Some(user) = matched else {
        return Err(AppError::Validation(
            "Employee details did not match our records.".into(),
        )
        .into());
    };

    let password_hash = hash_password(&payload.new_password)?;
    user_repo.update_password(user.id, &password_hash).await?;

    info!(user_id = %user.id, "Password reset via forgot-password flow");

    Ok(Json(json!({
        "message": "Password updated successfully. You can now log in with your new password."
    })))
}

//! Voucher CRUD routes.
//!
//! All operations are scoped to the authenticated owner. Create and update
//! run the submitted lines through the core normalizer and re-derive the
//! total and its amount-in-words phrase.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::CurrentUser;
use kharcha_core::currency::amount_to_words;
use kharcha_core::voucher::{LineInput, normalize_lines};
use kharcha_db::VoucherRepository;
use kharcha_db::entities::sea_orm_active_enums::VoucherType;
use kharcha_db::entities::{voucher_lines, vouchers};
use kharcha_db::repositories::{
    CreateVoucherInput, LineReplacement, UpdateVoucherInput, VoucherWithLines,
};

/// Creates the voucher router. The authentication middleware is layered by
/// the caller.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vouchers", get(list).post(create))
        .route("/vouchers/{id}", get(get_by_id).put(update).delete(remove))
}

/// A submitted voucher line.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoucherLinePayload {
    description: Option<String>,
    unit: Option<String>,
    amount: Option<Decimal>,
    line_order: Option<i32>,
    is_gap: Option<bool>,
}

impl From<VoucherLinePayload> for LineInput {
    fn from(payload: VoucherLinePayload) -> Self {
        Self {
            description: payload.description,
            unit: payload.unit,
            amount: payload.amount,
            line_order: payload.line_order,
            is_gap: payload.is_gap.unwrap_or(false),
        }
    }
}

/// Request body for `POST /vouchers`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateVoucherRequest {
    #[validate(length(min = 1, message = "Serial number is required"))]
    serial_number: String,
    issue_date: Option<DateTime<Utc>>,
    remarks: Option<String>,
    #[serde(rename = "type")]
    voucher_type: Option<VoucherType>,
    #[validate(length(min = 1, message = "At least one line is required"))]
    lines: Vec<VoucherLinePayload>,
}

/// Request body for `PUT /vouchers/{id}`. Every field is independently
/// present or absent.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateVoucherRequest {
    #[validate(length(min = 1, message = "Serial number must not be empty"))]
    serial_number: Option<String>,
    issue_date: Option<DateTime<Utc>>,
    remarks: Option<String>,
    #[serde(rename = "type")]
    voucher_type: Option<VoucherType>,
    #[validate(length(min = 1, message = "At least one line is required"))]
    lines: Option<Vec<VoucherLinePayload>>,
}

/// A voucher line in API responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoucherLineResponse {
    id: Uuid,
    description: String,
    unit: Option<String>,
    amount: Decimal,
    line_order: i32,
    is_gap: bool,
}

impl From<voucher_lines::Model> for VoucherLineResponse {
    fn from(line: voucher_lines::Model) -> Self {
        Self {
            id: line.id,
            description: line.description,
            unit: line.unit,
            amount: line.amount,
            line_order: line.line_order,
            is_gap: line.is_gap,
        }
    }
}

/// A voucher with its lines in API responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoucherResponse {
    id: Uuid,
    serial_number: String,
    issue_date: DateTime<Utc>,
    remarks: Option<String>,
    total_amount: Decimal,
    total_amount_words: String,
    #[serde(rename = "type")]
    voucher_type: VoucherType,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    lines: Vec<VoucherLineResponse>,
}

impl From<VoucherWithLines> for VoucherResponse {
    fn from(result: VoucherWithLines) -> Self {
        let vouchers::Model {
            id,
            serial_number,
            issue_date,
            remarks,
            voucher_type,
            total_amount,
            total_amount_words,
            created_at,
            updated_at,
            ..
        } = result.voucher;

        Self {
            id,
            serial_number,
            issue_date: issue_date.with_timezone(&Utc),
            remarks,
            total_amount,
            total_amount_words,
            voucher_type,
            created_at: created_at.with_timezone(&Utc),
            updated_at: updated_at.with_timezone(&Utc),
            lines: result.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// GET /vouchers - List the caller's vouchers, newest first.
async fn list(State(state): State<AppState>, user: CurrentUser) -> ApiResult<impl IntoResponse> {
    let repo = VoucherRepository::new((*state.db).clone());
    let vouchers = repo.list_for_user(user.id).await?;

    let vouchers: Vec<VoucherResponse> = vouchers.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "vouchers": vouchers })))
}

/// GET /vouchers/{id} - Get one of the caller's vouchers.
async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = VoucherRepository::new((*state.db).clone());
    let voucher = repo.find_for_user(user.id, id).await?;

    Ok(Json(json!({ "voucher": VoucherResponse::from(voucher) })))
}

/// POST /vouchers - Create a voucher with its lines.
async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateVoucherRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;

    let inputs: Vec<LineInput> = payload.lines.into_iter().map(Into::into).collect();
    let batch = normalize_lines(&inputs)?;
    let total_amount_words = amount_to_words(batch.total);

    let repo = VoucherRepository::new((*state.db).clone());
    let created = repo
        .create(
            user.id,
            CreateVoucherInput {
                serial_number: payload.serial_number,
                issue_date: payload.issue_date.map(Into::into),
                remarks: payload.remarks,
                voucher_type: payload.voucher_type.unwrap_or(VoucherType::Expense),
                total_amount: batch.total,
                total_amount_words,
                lines: batch.lines,
            },
        )
        .await?;

    info!(
        voucher_id = %created.voucher.id,
        serial_number = %created.voucher.serial_number,
        "Voucher created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "voucher": VoucherResponse::from(created) })),
    ))
}

/// PUT /vouchers/{id} - Update one of the caller's vouchers.
///
/// Supplied fields replace stored values; a supplied line set replaces the
/// previous lines entirely and re-derives the total.
async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVoucherRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;

    let lines = match payload.lines {
        Some(lines) => {
            let inputs: Vec<LineInput> = lines.into_iter().map(Into::into).collect();
            let batch = normalize_lines(&inputs)?;
            let total_amount_words = amount_to_words(batch.total);
            Some(LineReplacement {
                lines: batch.lines,
                total_amount: batch.total,
                total_amount_words,
            })
        }
        None => None,
    };

    let repo = VoucherRepository::new((*state.db).clone());
    let updated = repo
        .update(
            user.id,
            id,
            UpdateVoucherInput {
                serial_number: payload.serial_number,
                issue_date: payload.issue_date.map(Into::into),
                remarks: payload.remarks,
                voucher_type: payload.voucher_type,
                lines,
            },
        )
        .await?;

    info!(voucher_id = %updated.voucher.id, "Voucher updated");

    Ok(Json(json!({ "voucher": VoucherResponse::from(updated) })))
}

/// DELETE /vouchers/{id} - Delete one of the caller's vouchers and its
/// lines.
async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = VoucherRepository::new((*state.db).clone());
    repo.delete(user.id, id).await?;

    info!(voucher_id = %id, "Voucher deleted");

    Ok(StatusCode::NO_CONTENT)
}

//! Back-office management of registrations.
//!
//! Admin responses carry the full row (the entity model already keeps the
//! OTP triad and verification token out of its JSON form).

use super::types::{AdminImportRequest, AdminUpdateRequest, MessageResponse};
use super::{mint_verification_token, AppState};
use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use entity::registration;
use entity::Registration;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

/// Full registration listing, newest first.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<registration::Model>>, ApiError> {
    let rows = Registration::find()
        .order_by_desc(registration::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

/// Import a registration without a payment step (legacy books, desk
/// registrations).
pub async fn import_registration(
    State(state): State<AppState>,
    Json(body): Json<AdminImportRequest>,
) -> Result<(StatusCode, Json<registration::Model>), ApiError> {
    if body.phone.trim().is_empty() {
        return Err(ApiError::BadRequest("Phone is required".into()));
    }

    let now = state.clock.now();
    let row = registration::ActiveModel {
        first_name: Set(body.first_name.trim().to_string()),
        last_name: Set(body.last_name.trim().to_string()),
        council_reg_no: Set(body.council_reg_no),
        member_number: Set(body.member_number),
        phone: Set(body.phone.trim().to_string()),
        email: Set(body.email),
        address: Set(body.address),
        district: Set(body.district),
        membership_type: Set(body.membership_type),
        payment_status: Set(body.payment_status.unwrap_or_else(|| "offline".into())),
        payment_reference: Set(body.payment_reference),
        source: Set(body.source),
        status: Set(body.status.unwrap_or_else(|| "verified".into())),
        otp_code: Set(None),
        otp_expires_at: Set(None),
        otp_attempts: Set(0),
        verification_token: Set(mint_verification_token()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(registration_id = row.id, "Registration imported");

    Ok((StatusCode::CREATED, Json(row)))
}

/// Partial update of workflow and payment fields.
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AdminUpdateRequest>,
) -> Result<Json<registration::Model>, ApiError> {
    let row = Registration::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active: registration::ActiveModel = row.into();
    if let Some(member_number) = body.member_number {
        active.member_number = Set(Some(member_number));
    }
    if let Some(status) = body.status {
        active.status = Set(status);
    }
    if let Some(payment_status) = body.payment_status {
        active.payment_status = Set(payment_status);
    }
    if let Some(payment_reference) = body.payment_reference {
        active.payment_reference = Set(Some(payment_reference));
    }
    if let Some(district) = body.district {
        active.district = Set(Some(district));
    }
    active.updated_at = Set(state.clock.now());

    let updated = active.update(&state.db).await?;
    info!(registration_id = id, "Registration updated by admin");

    Ok(Json(updated))
}

/// Hard delete. The only path that removes a row.
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = Registration::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }

    info!(registration_id = id, "Registration deleted by admin");

    Ok(Json(MessageResponse {
        message: "Registration deleted".into(),
    }))
}

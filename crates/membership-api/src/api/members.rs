//! Member-facing handlers: search, OTP dance, card, contact edits and
//! registration intake.

use super::middleware::SessionToken;
use super::types::*;
use super::{mint_verification_token, AppState};
use crate::error::ApiError;
use crate::otp::{self, ChallengeState, VerifyDecision};
use crate::{enrich, masking};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Duration as ChronoDuration;
use entity::registration::{self, RegistrationSource};
use entity::Registration;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use sheets_client::LedgerRow;
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_healthy = state.db.ping().await.is_ok();
    let registration_count = Registration::find().count(&state.db).await.unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        database_healthy,
        registration_count,
    })
}

/// Resolve a phone number or council registration number to matching
/// registrations, masked unless the caller's session verified one of them.
pub async fn search(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<masking::RegistrationView>>, ApiError> {
    let phone = params.phone.filter(|s| !s.trim().is_empty());
    let council_reg_no = params.council_reg_no.filter(|s| !s.trim().is_empty());

    // Exactly one key; the server trusts only the parameter actually sent.
    let rows = match (phone, council_reg_no) {
        (Some(phone), None) => {
            Registration::find()
                .filter(registration::Column::Phone.eq(phone.trim()))
                .all(&state.db)
                .await?
        }
        (None, Some(council_reg_no)) => {
            Registration::find()
                .filter(registration::Column::CouncilRegNo.eq(council_reg_no.trim()))
                .all(&state.db)
                .await?
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Search by exactly one of phone or council registration number".into(),
            ))
        }
    };

    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }

    let verified = match &token {
        Some(token) => state.sessions.verified_registration(token).await,
        None => None,
    };

    let now = state.clock.now();
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let row = enrich::backfill_member_number(&state.db, state.ledger.as_ref(), row, now)
            .await
            .into_model();
        views.push(masking::view(row, verified));
    }

    Ok(Json(views))
}

/// Issue an OTP challenge and deliver it to the email on file.
pub async fn send_otp(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let row = Registration::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let email = row
        .email
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or(ApiError::NoContactChannel)?;

    // The stamp stands even if delivery fails below, so an immediate retry
    // is throttled for the full interval.
    state.throttle.check_and_stamp(id).await?;

    let code = otp::generate();
    let now = state.clock.now();
    let ttl_minutes = state.config.otp.ttl.as_secs() / 60;
    let expires_at = now + ChronoDuration::seconds(state.config.otp.ttl.as_secs() as i64);

    let name = format!("{} {}", row.first_name, row.last_name);
    let mut active: registration::ActiveModel = row.into();
    active.otp_code = Set(Some(code.clone()));
    active.otp_expires_at = Set(Some(expires_at));
    active.otp_attempts = Set(0);
    active.updated_at = Set(now);
    active.update(&state.db).await?;

    state
        .email
        .send(
            &email,
            Some(&name),
            "Your verification code",
            None,
            Some(format!(
                "Your membership verification code is {}. It expires in {} minutes.",
                code, ttl_minutes
            )),
        )
        .await
        .map_err(|e| {
            warn!(error = %e, registration_id = id, "OTP email delivery failed");
            ApiError::DeliveryFailed
        })?;

    info!(registration_id = id, "Verification code issued");

    Ok(Json(MessageResponse {
        message: "Verification code sent to the email on file".into(),
    }))
}

/// Validate a submitted code and elevate the caller's session on success.
pub async fn verify_otp(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<i32>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    let row = Registration::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let now = state.clock.now();
    let challenge = ChallengeState::of(&row);

    match otp::evaluate(&challenge, body.code.trim(), now, state.config.otp.max_attempts) {
        VerifyDecision::Expired => Err(ApiError::Expired),
        VerifyDecision::Exhausted => Err(ApiError::TooManyAttempts),
        VerifyDecision::Mismatch => {
            let attempts = row.otp_attempts + 1;
            let mut active: registration::ActiveModel = row.into();
            active.otp_attempts = Set(attempts);
            active.updated_at = Set(now);
            active.update(&state.db).await?;
            Err(ApiError::InvalidCode)
        }
        VerifyDecision::Match => {
            let mut active: registration::ActiveModel = row.into();
            active.otp_code = Set(None);
            active.otp_expires_at = Set(None);
            active.otp_attempts = Set(0);
            active.updated_at = Set(now);
            let updated = active.update(&state.db).await?;

            let session_token = state.sessions.grant(token.as_deref(), id).await;
            info!(registration_id = id, "Registration ownership verified");

            Ok(Json(VerifyOtpResponse {
                success: true,
                session_token,
                registration: masking::view(updated, Some(id)),
            }))
        }
    }
}

/// Public membership card, keyed by raw registration id.
pub async fn membership_card(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MembershipCard>, ApiError> {
    let row = Registration::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(MembershipCard {
        id: row.id,
        name: format!("{} {}", row.first_name, row.last_name),
        district: row.district,
        membership_type: row.membership_type,
        member_number: row.member_number,
        status: row.status,
    }))
}

/// Update contact fields; only the session that verified this exact
/// registration may do so.
pub async fn update_contact(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<i32>,
    Json(body): Json<ContactUpdateRequest>,
) -> Result<Json<masking::RegistrationView>, ApiError> {
    let verified = match &token {
        Some(token) => state.sessions.verified_registration(token).await,
        None => None,
    };

    if verified != Some(id) {
        return Err(ApiError::NotVerified);
    }

    let row = Registration::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if body.phone.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(ApiError::BadRequest("Phone cannot be empty".into()));
    }

    let mut active: registration::ActiveModel = row.into();
    if let Some(phone) = body.phone {
        active.phone = Set(phone.trim().to_string());
    }
    if let Some(email) = body.email {
        active.email = Set(Some(email.trim().to_string()));
    }
    if let Some(address) = body.address {
        active.address = Set(Some(address));
    }
    if let Some(district) = body.district {
        active.district = Set(Some(district));
    }
    active.updated_at = Set(state.clock.now());

    let updated = active.update(&state.db).await?;
    info!(registration_id = id, "Contact details updated");

    Ok(Json(masking::view(updated, Some(id))))
}

/// Open a gateway order for a new registration's membership fee.
pub async fn checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let amount = state.config.payments.fee_for(&body.membership_type);

    let order = state
        .payments
        .create_order(amount, &state.config.payments.currency)
        .await
        .map_err(|e| {
            warn!(error = %e, "Gateway order creation failed");
            ApiError::GatewayUnavailable
        })?;

    Ok(Json(CheckoutResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.payments.key_id().to_string(),
    }))
}

/// Create a registration after a successful gateway payment.
///
/// The ledger append and both notifications are best-effort: each failure
/// is logged and the registration still succeeds.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<registration::Model>), ApiError> {
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".into()));
    }
    if body.phone.trim().is_empty() {
        return Err(ApiError::BadRequest("Phone is required".into()));
    }

    if !state
        .payments
        .verify_signature(&body.order_id, &body.payment_id, &body.signature)
    {
        warn!(order_id = %body.order_id, "Payment signature rejected");
        return Err(ApiError::InvalidPayment);
    }

    let now = state.clock.now();
    let row = registration::ActiveModel {
        first_name: Set(body.first_name.trim().to_string()),
        last_name: Set(body.last_name.trim().to_string()),
        council_reg_no: Set(body.council_reg_no.clone()),
        member_number: Set(None),
        phone: Set(body.phone.trim().to_string()),
        email: Set(body.email.clone()),
        address: Set(body.address),
        district: Set(body.district.clone()),
        membership_type: Set(body.membership_type.clone()),
        payment_status: Set("paid".into()),
        payment_reference: Set(Some(body.payment_id.clone())),
        source: Set(RegistrationSource::Online),
        status: Set("pending-verification".into()),
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

    if let Err(e) = state
        .ledger
        .append_registration(&LedgerRow {
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            council_reg_no: row.council_reg_no.clone(),
            phone: row.phone.clone(),
            email: row.email.clone(),
            district: row.district.clone(),
            membership_type: row.membership_type.as_str().to_string(),
            payment_reference: row.payment_reference.clone(),
        })
        .await
    {
        warn!(error = %e, registration_id = row.id, "Ledger append failed");
    }

    let name = format!("{} {}", row.first_name, row.last_name);
    if let Some(email) = row.email.clone().filter(|e| !e.trim().is_empty()) {
        if let Err(e) = state
            .email
            .send(
                &email,
                Some(&name),
                "Welcome to the association",
                None,
                Some(format!(
                    "Dear Dr. {}, your membership registration is received and pending verification.",
                    name
                )),
            )
            .await
        {
            warn!(error = %e, registration_id = row.id, "Welcome email failed");
        }
    }

    if let Err(e) = state
        .sms
        .send(
            &row.phone,
            "Your membership registration is received and pending verification.",
        )
        .await
    {
        warn!(error = %e, registration_id = row.id, "Welcome SMS failed");
    }

    info!(registration_id = row.id, "Registration created");

    Ok((StatusCode::CREATED, Json(row)))
}

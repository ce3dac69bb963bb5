//! API request and response types.

use chrono::NaiveDate;
use entity::registration::{MembershipType, RegistrationSource};
use serde::{Deserialize, Serialize};

/// Query for the member search endpoint. Exactly one key must be given.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub phone: Option<String>,
    pub council_reg_no: Option<String>,
}

/// Generic message envelope for simple outcomes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Code submission for OTP verification.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub code: String,
}

/// Response after a successful verification.
#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    /// Token the client must present to keep the unmasked view.
    pub session_token: String,
    pub registration: crate::masking::RegistrationView,
}

/// Contact fields a verified member may edit.
#[derive(Debug, Deserialize)]
pub struct ContactUpdateRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
}

/// Public membership card, keyed by registration id.
#[derive(Debug, Serialize)]
pub struct MembershipCard {
    pub id: i32,
    pub name: String,
    pub district: Option<String>,
    pub membership_type: MembershipType,
    pub member_number: Option<String>,
    pub status: String,
}

/// Request to open a payment order for a new registration.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub membership_type: MembershipType,
}

/// Order details for the client-side payment widget.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
    pub key_id: String,
}

/// Registration submission after the gateway callback.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub council_reg_no: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub membership_type: MembershipType,
    /// Gateway order id handed out at checkout.
    pub order_id: String,
    /// Gateway payment id from the widget callback.
    pub payment_id: String,
    /// Gateway HMAC signature over order and payment ids.
    pub signature: String,
}

/// Administrative import of a registration (no payment step).
#[derive(Debug, Deserialize)]
pub struct AdminImportRequest {
    pub first_name: String,
    pub last_name: String,
    pub council_reg_no: Option<String>,
    pub member_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub membership_type: MembershipType,
    #[serde(default = "default_import_source")]
    pub source: RegistrationSource,
    pub payment_status: Option<String>,
    pub payment_reference: Option<String>,
    pub status: Option<String>,
}

fn default_import_source() -> RegistrationSource {
    RegistrationSource::Admin
}

/// Partial administrative update of a registration.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateRequest {
    pub member_number: Option<String>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_reference: Option<String>,
    pub district: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database_healthy: bool,
    pub registration_count: u64,
}

// Content management payloads.

#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub title: String,
    pub body: String,
    pub attachment_url: Option<String>,
    pub published_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PanelMemberRequest {
    pub name: String,
    pub designation: String,
    pub district: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct AchievementRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub achieved_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct GalleryItemRequest {
    pub title: String,
    pub image_url: String,
    pub taken_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct MediaCoverageRequest {
    pub title: String,
    pub outlet: String,
    pub article_url: Option<String>,
    pub image_url: Option<String>,
    pub published_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ElectionDocumentRequest {
    pub title: String,
    pub file_url: String,
    pub published_on: NaiveDate,
}

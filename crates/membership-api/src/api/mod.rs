//! HTTP API for the membership portal.

mod admin;
mod content;
mod members;
mod middleware;
mod types;

pub use middleware::{
    admin_auth_middleware, logging_middleware, rate_limit_middleware, RateLimitState, SessionToken,
};
pub use types::*;

use crate::config::Config;
use crate::enrich::MemberLedger;
use crate::otp::{Clock, IssueThrottle, SystemClock};
use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use notify_client::{EmailClient, SmsClient};
use payments_client::PaymentsClient;
use sea_orm::DatabaseConnection;
use session_store::SessionStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Relational store
    pub db: DatabaseConnection,
    /// Session token → verified registration id
    pub sessions: SessionStore,
    /// Per-registration OTP issuance throttle
    pub throttle: IssueThrottle,
    /// Time source shared with the throttle
    pub clock: Arc<dyn Clock>,
    /// Member-ledger bridge
    pub ledger: Arc<dyn MemberLedger>,
    /// Transactional email
    pub email: Arc<EmailClient>,
    /// Transactional SMS
    pub sms: Arc<SmsClient>,
    /// Payment gateway
    pub payments: Arc<PaymentsClient>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state on the system clock.
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        ledger: Arc<dyn MemberLedger>,
        email: EmailClient,
        sms: SmsClient,
        payments: PaymentsClient,
    ) -> Self {
        Self::with_clock(db, config, ledger, email, sms, payments, Arc::new(SystemClock))
    }

    /// Create application state on a caller-supplied clock (tests).
    pub fn with_clock(
        db: DatabaseConnection,
        config: Config,
        ledger: Arc<dyn MemberLedger>,
        email: EmailClient,
        sms: SmsClient,
        payments: PaymentsClient,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions = SessionStore::new(config.session.ttl);
        let throttle = IssueThrottle::with_clock(config.otp.resend_interval, clock.clone());

        Self {
            db,
            sessions,
            throttle,
            clock,
            ledger,
            email: Arc::new(email),
            sms: Arc::new(sms),
            payments: Arc::new(payments),
            config: Arc::new(config),
        }
    }
}

/// Random hex token stored on every registration row at creation.
pub(crate) fn mint_verification_token() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Create the API router with the configured rate limit.
pub fn create_router(state: AppState) -> Router {
    let rpm = state.config.rate_limit.global_per_minute;
    create_router_with_rate_limit(state, RateLimitState::new(rpm))
}

/// Create the API router with custom rate limiting.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        // Health check (no rate limiting concerns worth special-casing)
        .route("/health", get(members::health))
        // Member search and the OTP-gated unmask/edit flow
        .route("/api/members/search", get(members::search))
        .route("/api/members/:id/otp", post(members::send_otp))
        .route("/api/members/:id/otp/verify", post(members::verify_otp))
        .route("/api/members/:id/card", get(members::membership_card))
        .route("/api/members/:id/contact", put(members::update_contact))
        // Registration intake
        .route("/api/registrations/checkout", post(members::checkout))
        .route("/api/registrations", post(members::register))
        // Public content
        .route("/api/announcements", get(content::list_announcements))
        .route("/api/panel", get(content::list_panel_members))
        .route("/api/achievements", get(content::list_achievements))
        .route("/api/gallery", get(content::list_gallery_items))
        .route("/api/media-coverage", get(content::list_media_coverage))
        .route(
            "/api/election-documents",
            get(content::list_election_documents),
        )
        // Back-office
        .nest("/api/admin", admin_router(state.clone()))
        .layer(axum_middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Admin routes, all behind the shared-secret header check.
fn admin_router(state: AppState) -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route(
            "/registrations",
            get(admin::list_registrations).post(admin::import_registration),
        )
        .route(
            "/registrations/:id",
            put(admin::update_registration).delete(admin::delete_registration),
        )
        .route("/announcements", post(content::create_announcement))
        .route(
            "/announcements/:id",
            put(content::update_announcement).delete(content::delete_announcement),
        )
        .route("/panel", post(content::create_panel_member))
        .route("/panel/:id", delete(content::delete_panel_member))
        .route("/achievements", post(content::create_achievement))
        .route("/achievements/:id", delete(content::delete_achievement))
        .route("/gallery", post(content::create_gallery_item))
        .route("/gallery/:id", delete(content::delete_gallery_item))
        .route("/media-coverage", post(content::create_media_coverage))
        .route("/media-coverage/:id", delete(content::delete_media_coverage))
        .route(
            "/election-documents",
            post(content::create_election_document),
        )
        .route(
            "/election-documents/:id",
            delete(content::delete_election_document),
        )
        .layer(axum_middleware::from_fn_with_state(
            state,
            admin_auth_middleware,
        ))
}

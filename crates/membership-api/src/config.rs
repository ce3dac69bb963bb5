//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use entity::registration::MembershipType;
use serde::Deserialize;
use std::time::Duration;

/// Portal configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// OTP challenge configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Transactional email provider
    #[serde(default)]
    pub email: EmailConfig,

    /// SMS gateway
    #[serde(default)]
    pub sms: SmsConfig,

    /// Member-ledger spreadsheet bridge
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Payment gateway
    #[serde(default)]
    pub payments: PaymentsConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Admin surface
    #[serde(default)]
    pub admin: AdminConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres in production, sqlite for local runs).
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    /// How long an issued code stays valid.
    #[serde(default = "default_otp_ttl", with = "humantime_serde")]
    pub ttl: Duration,

    /// Minimum gap between two issuances for the same registration.
    #[serde(default = "default_resend_interval", with = "humantime_serde")]
    pub resend_interval: Duration,

    /// Wrong submissions tolerated per challenge.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle lifetime of a verified session.
    #[serde(default = "default_session_ttl", with = "humantime_serde")]
    pub ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_email_api_url")]
    pub api_url: String,

    /// Provider key. Absent key selects log-only delivery.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    #[serde(default)]
    pub sender_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    #[serde(default = "default_sms_api_url")]
    pub api_url: String,

    /// Gateway key. Absent key selects log-only delivery.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_sms_sender_id")]
    pub sender_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    #[serde(default = "default_sheets_api_url")]
    pub api_url: String,

    /// Bridge key. Absent key degrades lookups to not-found.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_sheet_id")]
    pub sheet_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default = "default_payments_api_url")]
    pub api_url: String,

    #[serde(default = "default_key_id")]
    pub key_id: String,

    #[serde(default)]
    pub key_secret: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Life membership fee in paise.
    #[serde(default = "default_life_fee")]
    pub life_fee: u64,

    /// Annual membership fee in paise.
    #[serde(default = "default_annual_fee")]
    pub annual_fee: u64,
}

impl PaymentsConfig {
    /// Fee for a membership type, in paise.
    pub fn fee_for(&self, membership_type: &MembershipType) -> u64 {
        match membership_type {
            MembershipType::Life => self.life_fee,
            MembershipType::Annual => self.annual_fee,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Global requests per minute
    #[serde(default = "default_global_rpm")]
    pub global_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Shared secret for the back-office. Absent token disables the
    /// admin surface entirely.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl: default_otp_ttl(),
            resend_interval: default_resend_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: default_session_ttl(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: default_email_api_url(),
            api_key: None,
            sender_email: default_sender_email(),
            sender_name: None,
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            api_url: default_sms_api_url(),
            api_key: None,
            sender_id: default_sms_sender_id(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_url: default_sheets_api_url(),
            api_key: None,
            sheet_id: default_sheet_id(),
        }
    }
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            api_url: default_payments_api_url(),
            key_id: default_key_id(),
            key_secret: String::new(),
            currency: default_currency(),
            life_fee: default_life_fee(),
            annual_fee: default_annual_fee(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            global_per_minute: default_global_rpm(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { token: None }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://membership.db?mode=rwc".into()
}

fn default_otp_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_resend_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_max_attempts() -> i32 {
    3
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_email_api_url() -> String {
    "https://api.brevo.com".into()
}

fn default_sender_email() -> String {
    "no-reply@example.org".into()
}

fn default_sms_api_url() -> String {
    "https://api.msg91.example".into()
}

fn default_sms_sender_id() -> String {
    "ASSNMD".into()
}

fn default_sheets_api_url() -> String {
    "http://sheets-bridge:8085".into()
}

fn default_sheet_id() -> String {
    "member-ledger".into()
}

fn default_payments_api_url() -> String {
    "https://api.razorpay.com".into()
}

fn default_key_id() -> String {
    "rzp_test_key".into()
}

fn default_currency() -> String {
    "INR".into()
}

fn default_life_fee() -> u64 {
    250_000
}

fn default_annual_fee() -> u64 {
    50_000
}

fn default_global_rpm() -> u32 {
    120
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // try_parsing(true) would turn phone-like strings into
                    // numbers. Keep strings as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

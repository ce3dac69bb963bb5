//! Membership portal backend for a doctors' association.
//!
//! The public surface covers member search with PII masking, OTP-gated
//! unmasking and contact edits, paid registration intake, and the content
//! the association publishes (announcements, panel, achievements, gallery,
//! media coverage, election documents). A token-guarded admin surface
//! manages registrations and content.

pub mod api;
pub mod config;
pub mod enrich;
pub mod error;
pub mod masking;
pub mod otp;

pub use config::Config;
pub use error::ApiError;

//! Transactional email and SMS delivery for the membership portal.
//!
//! Both clients wrap a hosted provider's REST API. When the provider
//! credential is absent the clients run in log-only mode: the message is
//! logged and delivery reports success, which keeps local development and
//! tests off the network.

mod email;
mod error;
mod sms;

pub use email::EmailClient;
pub use error::NotifyError;
pub use sms::SmsClient;

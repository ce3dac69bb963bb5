//! Notification client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Delivery failed ({status}): {message}")]
    Delivery { status: u16, message: String },
}

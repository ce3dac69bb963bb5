//! Payment client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway error ({status}): {message}")]
    Gateway { status: u16, message: String },
}

//! Sheets bridge client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ledger API error ({status}): {message}")]
    Api { status: u16, message: String },
}

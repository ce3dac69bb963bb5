//! Client for the association's member-ledger spreadsheet bridge.
//!
//! The ledger is the source of truth for association-issued member
//! numbers, which are assigned out-of-band after payment. This client
//! covers the two operations the portal needs: looking a member number up
//! by council registration number, and appending a freshly paid
//! registration as a new ledger row.
//!
//! Without credentials the client degrades quietly: lookups report
//! not-found and appends become log-only no-ops.

mod client;
mod error;
mod types;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use types::LedgerRow;

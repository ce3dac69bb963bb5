//! Ledger row and response types.

use serde::{Deserialize, Serialize};

/// A registration row as appended to the ledger sheet.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    pub first_name: String,
    pub last_name: String,
    pub council_reg_no: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub district: Option<String>,
    pub membership_type: String,
    pub payment_reference: Option<String>,
}

/// Lookup response from the bridge.
#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    pub member_number: Option<String>,
}

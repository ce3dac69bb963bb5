//! Gateway order types.

use serde::{Deserialize, Serialize};

/// Order creation payload sent to the gateway.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    /// Amount in the currency's smallest unit (paise).
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

/// An order as returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    #[serde(default)]
    pub status: Option<String>,
}

//! Payment gateway integration for membership fees.
//!
//! The portal creates a gateway order server-side, hands the order id to
//! the browser widget, and on callback verifies the gateway's HMAC-SHA256
//! signature over `"{order_id}|{payment_id}"` before treating the
//! registration as paid.

mod client;
mod error;
mod types;

pub use client::PaymentsClient;
pub use error::PaymentsError;
pub use types::{GatewayOrder, OrderRequest};

//! Gateway HTTP client and signature verification.

use crate::error::PaymentsError;
use crate::types::{GatewayOrder, OrderRequest};
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Payment gateway client.
#[derive(Clone)]
pub struct PaymentsClient {
    client: Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
}

impl PaymentsClient {
    /// Create a new gateway client.
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: SecretString,
    ) -> Result<Self, PaymentsError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret,
        })
    }

    /// The public key id, safe to hand to the browser widget.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create an order for `amount` (smallest currency unit).
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        amount: u64,
        currency: &str,
    ) -> Result<GatewayOrder, PaymentsError> {
        let request = OrderRequest {
            amount,
            currency: currency.to_string(),
            receipt: format!("rcpt_{}", Uuid::new_v4().simple()),
        };

        let response = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, message = %message, "Order creation failed");
            return Err(PaymentsError::Gateway { status, message });
        }

        let order: GatewayOrder = response.json().await?;
        debug!(order_id = %order.id, amount = order.amount, "Gateway order created");
        Ok(order)
    }

    /// Verify the gateway's payment signature.
    ///
    /// The gateway signs `"{order_id}|{payment_id}"` with the key secret
    /// and sends the HMAC-SHA256 digest hex-encoded. Comparison happens on
    /// the raw MAC, so malformed hex simply fails verification.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(self.key_secret.expose_secret().as_bytes())
        else {
            return false;
        };
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());

        mac.verify_slice(&expected).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_create_order() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "order_abc",
                "amount": 250000,
                "currency": "INR",
                "receipt": "rcpt_1",
                "status": "created"
            })))
            .mount(&server)
            .await;

        let client = PaymentsClient::new(
            server.uri(),
            "key_id",
            SecretString::new("key_secret".into()),
        )
        .unwrap();

        let order = client.create_order(250000, "INR").await.unwrap();
        assert_eq!(order.id, "order_abc");
        assert_eq!(order.amount, 250000);
    }

    #[tokio::test]
    async fn test_create_order_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let client = PaymentsClient::new(
            server.uri(),
            "key_id",
            SecretString::new("key_secret".into()),
        )
        .unwrap();

        let err = client.create_order(100, "INR").await.unwrap_err();
        assert!(matches!(err, PaymentsError::Gateway { status: 401, .. }));
    }

    #[test]
    fn test_verify_signature_accepts_valid() {
        let client = PaymentsClient::new(
            "http://localhost:9",
            "key_id",
            SecretString::new("key_secret".into()),
        )
        .unwrap();

        let signature = sign("key_secret", "order_abc", "pay_xyz");
        assert!(client.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn test_verify_signature_rejects_tampering() {
        let client = PaymentsClient::new(
            "http://localhost:9",
            "key_id",
            SecretString::new("key_secret".into()),
        )
        .unwrap();

        let signature = sign("key_secret", "order_abc", "pay_xyz");
        assert!(!client.verify_signature("order_abc", "pay_other", &signature));
        assert!(!client.verify_signature("order_abc", "pay_xyz", "not-hex"));

        let wrong_key = sign("other_secret", "order_abc", "pay_xyz");
        assert!(!client.verify_signature("order_abc", "pay_xyz", &wrong_key));
    }
}

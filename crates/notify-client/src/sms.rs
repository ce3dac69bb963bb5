//! Transactional SMS client.

use crate::error::NotifyError;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Serialize)]
struct SendSmsBody {
    sender: String,
    to: String,
    message: String,
}

/// SMS gateway client.
#[derive(Clone)]
pub struct SmsClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    sender_id: String,
}

impl SmsClient {
    /// Create a new SMS client. `api_key` of `None` selects log-only mode.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        sender_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            sender_id: sender_id.into(),
        })
    }

    /// Whether a gateway credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a text message.
    #[instrument(skip(self, message))]
    pub async fn send(&self, to: &str, message: &str) -> Result<(), NotifyError> {
        let Some(api_key) = &self.api_key else {
            info!(to = %to, "SMS gateway unconfigured, log-only delivery");
            return Ok(());
        };

        let body = SendSmsBody {
            sender: self.sender_id.clone(),
            to: to.to_string(),
            message: message.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/sms", self.base_url))
            .header("authkey", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, message = %message, "SMS delivery failed");
            return Err(NotifyError::Delivery { status, message });
        }

        debug!(to = %to, "SMS accepted by gateway");
        Ok(())
    }
}

//! Transactional email client.

use crate::error::NotifyError;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: EmailAddress,
    to: Vec<EmailAddress>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_content: Option<String>,
}

/// Transactional email provider client.
#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    sender_email: String,
    sender_name: Option<String>,
}

impl EmailClient {
    /// Create a new email client. `api_key` of `None` selects log-only mode.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        sender_email: impl Into<String>,
        sender_name: Option<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            sender_email: sender_email.into(),
            sender_name,
        })
    }

    /// Whether a provider credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send an email.
    #[instrument(skip(self, html, text))]
    pub async fn send(
        &self,
        to_email: &str,
        to_name: Option<&str>,
        subject: &str,
        html: Option<String>,
        text: Option<String>,
    ) -> Result<(), NotifyError> {
        let Some(api_key) = &self.api_key else {
            info!(to = %to_email, subject, "Email provider unconfigured, log-only delivery");
            return Ok(());
        };

        let body = SendEmailBody {
            sender: EmailAddress {
                email: self.sender_email.clone(),
                name: self.sender_name.clone(),
            },
            to: vec![EmailAddress {
                email: to_email.to_string(),
                name: to_name.map(|s| s.to_string()),
            }],
            subject: subject.to_string(),
            html_content: html,
            text_content: text,
        };

        let response = self
            .client
            .post(format!("{}/v3/smtp/email", self.base_url))
            .header("api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, message = %message, "Email delivery failed");
            return Err(NotifyError::Delivery { status, message });
        }

        debug!(to = %to_email, "Email accepted by provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_posts_provider_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/smtp/email"))
            .and(header("api-key", "key"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = EmailClient::new(
            server.uri(),
            Some(SecretString::new("key".into())),
            "portal@example.org",
            Some("Membership Portal".into()),
        )
        .unwrap();

        client
            .send(
                "doc@x.com",
                Some("Dr. Asha Rao"),
                "Your verification code",
                None,
                Some("Code: 004821".into()),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_provider_rejection_surfaces() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad sender"))
            .mount(&server)
            .await;

        let client = EmailClient::new(
            server.uri(),
            Some(SecretString::new("key".into())),
            "portal@example.org",
            None,
        )
        .unwrap();

        let err = client
            .send("doc@x.com", None, "subject", None, Some("body".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Delivery { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_log_only_mode_succeeds_offline() {
        let client = EmailClient::new("http://localhost:9", None, "portal@example.org", None)
            .unwrap();

        assert!(!client.is_configured());
        client
            .send("doc@x.com", None, "subject", None, Some("body".into()))
            .await
            .unwrap();
    }
}

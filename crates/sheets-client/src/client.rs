//! Sheets bridge HTTP client.

use crate::error::SheetsError;
use crate::types::{LedgerRow, LookupResponse};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Member-ledger spreadsheet bridge client.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    sheet_id: String,
}

impl SheetsClient {
    /// Create a new sheets client.
    ///
    /// `api_key` of `None` produces an unconfigured client whose lookups
    /// report not-found and whose appends are log-only.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        sheet_id: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            sheet_id: sheet_id.into(),
        })
    }

    /// Whether credentials are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up the association-issued member number for a council
    /// registration number.
    ///
    /// Returns `Ok(None)` when the ledger has no row for the number or
    /// when the client is unconfigured.
    #[instrument(skip(self))]
    pub async fn lookup_member_number(
        &self,
        council_reg_no: &str,
    ) -> Result<Option<String>, SheetsError> {
        let Some(api_key) = &self.api_key else {
            debug!("Sheets bridge unconfigured, lookup reports not-found");
            return Ok(None);
        };

        let url = format!(
            "{}/v1/ledgers/{}/members/{}",
            self.base_url,
            encode(&self.sheet_id),
            encode(council_reg_no)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key.expose_secret())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status, message });
        }

        let body: LookupResponse = response.json().await?;
        debug!(council_reg_no, found = body.member_number.is_some(), "Ledger lookup");
        Ok(body.member_number)
    }

    /// Append a registration to the ledger sheet.
    ///
    /// Unconfigured clients log the row and return success; the ledger is
    /// an enrichment channel, not a system of record for the portal.
    #[instrument(skip(self, row))]
    pub async fn append_registration(&self, row: &LedgerRow) -> Result<(), SheetsError> {
        let Some(api_key) = &self.api_key else {
            warn!(phone = %row.phone, "Sheets bridge unconfigured, skipping ledger append");
            return Ok(());
        };

        let url = format!("{}/v1/ledgers/{}/rows", self.base_url, encode(&self.sheet_id));

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status, message });
        }

        debug!(phone = %row.phone, "Ledger row appended");
        Ok(())
    }
}

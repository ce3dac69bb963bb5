//! Best-effort backfill of association member numbers from the ledger.
//!
//! Every failure mode (network, auth, absent row, even the persist
//! itself) collapses to `Skipped`: enrichment never turns into a
//! user-facing error.

use chrono::{DateTime, Utc};
use entity::registration;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sheets_client::{LedgerRow, SheetsClient, SheetsError};
use tracing::{debug, warn};

/// The ledger operations the portal depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MemberLedger: Send + Sync {
    async fn lookup_member_number(
        &self,
        council_reg_no: &str,
    ) -> Result<Option<String>, SheetsError>;

    async fn append_registration(&self, row: &LedgerRow) -> Result<(), SheetsError>;
}

#[async_trait::async_trait]
impl MemberLedger for SheetsClient {
    async fn lookup_member_number(
        &self,
        council_reg_no: &str,
    ) -> Result<Option<String>, SheetsError> {
        SheetsClient::lookup_member_number(self, council_reg_no).await
    }

    async fn append_registration(&self, row: &LedgerRow) -> Result<(), SheetsError> {
        SheetsClient::append_registration(self, row).await
    }
}

/// Outcome of a backfill pass over one row.
#[derive(Debug)]
pub enum Enrichment {
    /// The ledger had the number and it was persisted onto the row.
    Enriched(registration::Model),
    /// Nothing to do, or the lookup/persist failed quietly.
    Skipped(registration::Model),
}

impl Enrichment {
    pub fn into_model(self) -> registration::Model {
        match self {
            Enrichment::Enriched(row) | Enrichment::Skipped(row) => row,
        }
    }
}

/// Fill in the member number for a row that lacks one, when the ledger
/// knows it under the row's council registration number.
pub async fn backfill_member_number(
    db: &DatabaseConnection,
    ledger: &dyn MemberLedger,
    row: registration::Model,
    now: DateTime<Utc>,
) -> Enrichment {
    if row.member_number.is_some() {
        return Enrichment::Skipped(row);
    }

    let Some(council_reg_no) = row.council_reg_no.clone() else {
        return Enrichment::Skipped(row);
    };

    match ledger.lookup_member_number(&council_reg_no).await {
        Ok(Some(member_number)) => {
            let mut active: registration::ActiveModel = row.clone().into();
            active.member_number = Set(Some(member_number.clone()));
            active.updated_at = Set(now);

            match active.update(db).await {
                Ok(updated) => {
                    debug!(
                        registration_id = updated.id,
                        member_number = %member_number,
                        "Member number backfilled from ledger"
                    );
                    Enrichment::Enriched(updated)
                }
                Err(e) => {
                    warn!(error = %e, registration_id = row.id, "Backfill persist failed");
                    Enrichment::Skipped(row)
                }
            }
        }
        Ok(None) => Enrichment::Skipped(row),
        Err(e) => {
            warn!(
                error = %e,
                council_reg_no = %council_reg_no,
                "Ledger lookup failed, returning row unenriched"
            );
            Enrichment::Skipped(row)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::registration::{MembershipType, RegistrationSource};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, EntityTrait};

    async fn test_db() -> DatabaseConnection {
        // A single pooled connection keeps every query on the same
        // in-memory database.
        let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn insert_row(db: &DatabaseConnection, council: Option<&str>) -> registration::Model {
        let now = Utc::now();
        registration::ActiveModel {
            first_name: Set("Asha".into()),
            last_name: Set("Rao".into()),
            council_reg_no: Set(council.map(String::from)),
            member_number: Set(None),
            phone: Set("9876543210".into()),
            email: Set(Some("doc@x.com".into())),
            address: Set(None),
            district: Set(None),
            membership_type: Set(MembershipType::Life),
            payment_status: Set("paid".into()),
            payment_reference: Set(None),
            source: Set(RegistrationSource::Online),
            status: Set("pending-verification".into()),
            otp_code: Set(None),
            otp_expires_at: Set(None),
            otp_attempts: Set(0),
            verification_token: Set("token".into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_hit_persists_member_number() {
        let db = test_db().await;
        let row = insert_row(&db, Some("MC-1001")).await;

        let mut ledger = MockMemberLedger::new();
        ledger
            .expect_lookup_member_number()
            .returning(|_| Ok(Some("LM-0420".into())));

        let outcome = backfill_member_number(&db, &ledger, row.clone(), Utc::now()).await;
        let enriched = match outcome {
            Enrichment::Enriched(m) => m,
            Enrichment::Skipped(_) => panic!("expected enrichment"),
        };
        assert_eq!(enriched.member_number.as_deref(), Some("LM-0420"));

        // And it is on disk, not just in memory.
        let reloaded = entity::Registration::find_by_id(row.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.member_number.as_deref(), Some("LM-0420"));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_swallowed() {
        let db = test_db().await;
        let row = insert_row(&db, Some("MC-1001")).await;

        let mut ledger = MockMemberLedger::new();
        ledger.expect_lookup_member_number().returning(|_| {
            Err(SheetsError::Api {
                status: 500,
                message: "quota".into(),
            })
        });

        let outcome = backfill_member_number(&db, &ledger, row, Utc::now()).await;
        let skipped = outcome.into_model();
        assert!(skipped.member_number.is_none());
    }

    #[tokio::test]
    async fn test_no_council_number_skips_lookup() {
        let db = test_db().await;
        let row = insert_row(&db, None).await;

        let mut ledger = MockMemberLedger::new();
        ledger.expect_lookup_member_number().times(0);

        let outcome = backfill_member_number(&db, &ledger, row, Utc::now()).await;
        assert!(matches!(outcome, Enrichment::Skipped(_)));
    }

    #[tokio::test]
    async fn test_existing_member_number_skips_lookup() {
        let db = test_db().await;
        let row = insert_row(&db, Some("MC-1001")).await;

        let mut active: registration::ActiveModel = row.into();
        active.member_number = Set(Some("LM-0001".into()));
        let row = active.update(&db).await.unwrap();

        let mut ledger = MockMemberLedger::new();
        ledger.expect_lookup_member_number().times(0);

        let outcome = backfill_member_number(&db, &ledger, row, Utc::now()).await;
        let model = outcome.into_model();
        assert_eq!(model.member_number.as_deref(), Some("LM-0001"));
    }
}

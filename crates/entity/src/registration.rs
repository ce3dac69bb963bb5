use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A member registration.
///
/// Phone is the primary external lookup key; the council registration
/// number is a secondary key used to backfill `member_number` from the
/// association's ledger spreadsheet. The `otp_*` triad holds the
/// short-lived email challenge and is either fully set (challenge
/// outstanding) or fully cleared.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Medical-council registration number. Legacy/manual rows may lack it.
    pub council_reg_no: Option<String>,

    /// Association-issued member number, assigned after the ledger round-trip.
    pub member_number: Option<String>,

    pub phone: String,

    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub district: Option<String>,

    pub membership_type: MembershipType,

    pub payment_status: String,

    pub payment_reference: Option<String>,

    pub source: RegistrationSource,

    /// Soft workflow tag: pending-verification | verified | rejected.
    pub status: String,

    #[serde(skip_serializing)]
    pub otp_code: Option<String>,

    #[serde(skip_serializing)]
    pub otp_expires_at: Option<DateTimeUtc>,

    #[serde(skip_serializing)]
    pub otp_attempts: i32,

    /// Random hex token minted at creation. Stored but not yet consumed by
    /// the public card endpoint (see DESIGN.md).
    #[serde(skip_serializing)]
    pub verification_token: String,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    #[sea_orm(string_value = "life")]
    Life,
    #[sea_orm(string_value = "annual")]
    Annual,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Life => "life",
            MembershipType::Annual => "annual",
        }
    }
}

/// Where a row came from.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationSource {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "import")]
    Import,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

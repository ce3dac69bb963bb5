//! PII masking for registration rows returned to unverified callers.
//!
//! Masking is a pure function of the row and the caller's verified
//! registration id: no clock, no randomness, no store access.

use chrono::{DateTime, Utc};
use entity::registration::{MembershipType, Model};
use serde::Serialize;

/// A registration as returned by the search and member endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub council_reg_no: Option<String>,
    pub member_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub membership_type: MembershipType,
    pub payment_status: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// True when PII fields were redacted for this caller.
    pub masked: bool,
}

/// Project a row for a caller whose session has verified `verified_id`.
///
/// The row is returned in full only when it is the one the session
/// verified; everything else gets partial email/phone redaction and a
/// nulled address.
pub fn view(row: Model, verified_id: Option<i32>) -> RegistrationView {
    let unmasked = verified_id == Some(row.id);

    RegistrationView {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        council_reg_no: row.council_reg_no,
        member_number: row.member_number,
        phone: if unmasked { row.phone } else { mask_phone(&row.phone) },
        email: if unmasked {
            row.email
        } else {
            row.email.as_deref().map(mask_email)
        },
        address: if unmasked { row.address } else { None },
        district: row.district,
        membership_type: row.membership_type,
        payment_status: row.payment_status,
        status: row.status,
        created_at: row.created_at,
        masked: !unmasked,
    }
}

/// Keep the first two characters of the local part and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let kept: String = local.chars().take(2).collect();
            let starred = "*".repeat(local.chars().count().saturating_sub(2));
            format!("{kept}{starred}@{domain}")
        }
        None => {
            let kept: String = email.chars().take(2).collect();
            let starred = "*".repeat(email.chars().count().saturating_sub(2));
            format!("{kept}{starred}")
        }
    }
}

/// Keep the first two and last two digits, star the middle.
pub fn mask_phone(phone: &str) -> String {
    let count = phone.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }

    let first: String = phone.chars().take(2).collect();
    let last: String = phone.chars().skip(count - 2).collect();
    format!("{first}{}{last}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::registration::RegistrationSource;

    fn row() -> Model {
        let now = Utc::now();
        Model {
            id: 42,
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            council_reg_no: Some("MC-1001".into()),
            member_number: Some("LM-0420".into()),
            phone: "9876543210".into(),
            email: Some("doc@x.com".into()),
            address: Some("12 MG Road".into()),
            district: Some("Warangal".into()),
            membership_type: MembershipType::Life,
            payment_status: "paid".into(),
            payment_reference: Some("pay_1".into()),
            source: RegistrationSource::Online,
            status: "pending-verification".into(),
            otp_code: None,
            otp_expires_at: None,
            otp_attempts: 0,
            verification_token: "deadbeef".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_mask_email_shapes() {
        assert_eq!(mask_email("doc@x.com"), "do*@x.com");
        assert_eq!(mask_email("asha.rao@example.org"), "as******@example.org");
        assert_eq!(mask_email("ab@x.com"), "ab@x.com");
        assert_eq!(mask_email("no-at-sign"), "no********");
    }

    #[test]
    fn test_mask_phone_shapes() {
        assert_eq!(mask_phone("9876543210"), "98******10");
        assert_eq!(mask_phone("12345"), "12*45");
        assert_eq!(mask_phone("1234"), "****");
    }

    #[test]
    fn test_unverified_caller_gets_redacted_copy() {
        let view = view(row(), None);

        assert!(view.masked);
        assert_eq!(view.phone, "98******10");
        assert_eq!(view.email.as_deref(), Some("do*@x.com"));
        assert!(view.address.is_none());
        // Non-PII fields pass through.
        assert_eq!(view.first_name, "Asha");
        assert_eq!(view.member_number.as_deref(), Some("LM-0420"));
    }

    #[test]
    fn test_verified_caller_gets_row_unchanged() {
        let view = view(row(), Some(42));

        assert!(!view.masked);
        assert_eq!(view.phone, "9876543210");
        assert_eq!(view.email.as_deref(), Some("doc@x.com"));
        assert_eq!(view.address.as_deref(), Some("12 MG Road"));
    }

    #[test]
    fn test_other_verified_id_still_masks() {
        let view = view(row(), Some(7));
        assert!(view.masked);
    }

    #[test]
    fn test_masking_is_deterministic() {
        let r = row();
        assert_eq!(view(r.clone(), None), view(r.clone(), None));
        assert_eq!(view(r.clone(), Some(42)), view(r, Some(42)));
    }

    #[test]
    fn test_missing_email_stays_missing() {
        let mut r = row();
        r.email = None;
        let view = view(r, None);
        assert!(view.email.is_none());
    }
}

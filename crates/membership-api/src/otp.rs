//! OTP challenges: code generation, issuance throttling and validation.

use crate::error::ApiError;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use entity::registration;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Time source, injectable so throttle and expiry checks are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests that simulate throttle intervals and
/// challenge expiry.
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(start),
        }
    }

    pub fn advance(&self, by: ChronoDuration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Generate a uniformly random 6-digit code, leading zeros preserved.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Generate a code from the thread-local RNG.
pub fn generate() -> String {
    generate_code(&mut rand::thread_rng())
}

/// The challenge state encoded by a row's nullable `otp_*` triad.
///
/// Exhaustion is not a separate persisted state: it is `Challenged` with
/// `attempts` at the cap, escaped only by a fresh issuance.
#[derive(Debug, Clone, PartialEq)]
pub enum ChallengeState {
    NoChallenge,
    Challenged {
        code: String,
        expires_at: DateTime<Utc>,
        attempts: i32,
    },
}

impl ChallengeState {
    /// Decode the triad from a registration row.
    pub fn of(row: &registration::Model) -> Self {
        match (&row.otp_code, row.otp_expires_at) {
            (Some(code), Some(expires_at)) => ChallengeState::Challenged {
                code: code.clone(),
                expires_at,
                attempts: row.otp_attempts,
            },
            _ => ChallengeState::NoChallenge,
        }
    }
}

/// What a submitted code means against the outstanding challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyDecision {
    /// No challenge outstanding, or the challenge is stale.
    Expired,
    /// The attempt counter is spent; rejected before comparing the code.
    Exhausted,
    /// Challenge live, code wrong.
    Mismatch,
    /// Challenge live, code right.
    Match,
}

/// Evaluate a submitted code. Pure; the caller persists the consequences.
pub fn evaluate(
    challenge: &ChallengeState,
    submitted: &str,
    now: DateTime<Utc>,
    max_attempts: i32,
) -> VerifyDecision {
    let ChallengeState::Challenged {
        code,
        expires_at,
        attempts,
    } = challenge
    else {
        return VerifyDecision::Expired;
    };

    if *expires_at <= now {
        return VerifyDecision::Expired;
    }

    if *attempts >= max_attempts {
        return VerifyDecision::Exhausted;
    }

    if code.as_str() != submitted {
        return VerifyDecision::Mismatch;
    }

    VerifyDecision::Match
}

/// Per-registration issuance throttle.
///
/// A per-key last-issued stamp behind an injectable clock. Process-local:
/// a multi-instance deployment throttles per instance, which is accepted
/// for a control that only damps one user's repeated clicks.
#[derive(Clone)]
pub struct IssueThrottle {
    last_issued: Arc<RwLock<HashMap<i32, DateTime<Utc>>>>,
    min_interval: ChronoDuration,
    clock: Arc<dyn Clock>,
}

impl IssueThrottle {
    /// Create a throttle on the system clock.
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, Arc::new(SystemClock))
    }

    /// Create a throttle on a caller-supplied clock.
    pub fn with_clock(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            last_issued: Arc::new(RwLock::new(HashMap::new())),
            min_interval: ChronoDuration::seconds(min_interval.as_secs() as i64),
            clock,
        }
    }

    /// Reject if an issuance for `key` happened within the interval,
    /// otherwise record this one.
    pub async fn check_and_stamp(&self, key: i32) -> Result<(), ApiError> {
        let now = self.clock.now();
        let mut last_issued = self.last_issued.write().await;

        if let Some(previous) = last_issued.get(&key) {
            if now - *previous < self.min_interval {
                debug!(registration_id = key, "Issuance throttled");
                return Err(ApiError::TooManyRequests);
            }
        }

        last_issued.insert(key, now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_codes_are_always_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_leading_zeros_are_preserved() {
        let mut rng = StdRng::seed_from_u64(7);
        let codes: Vec<String> = (0..500).map(|_| generate_code(&mut rng)).collect();

        // With 500 uniform draws a leading zero is all but certain; the
        // fixed seed makes this deterministic.
        assert!(codes.iter().any(|c| c.starts_with('0')));
        assert!(codes.iter().all(|c| c.len() == 6));
    }

    #[test]
    fn test_evaluate_no_challenge_is_expired() {
        let now = Utc::now();
        assert_eq!(
            evaluate(&ChallengeState::NoChallenge, "123456", now, 3),
            VerifyDecision::Expired
        );
    }

    #[test]
    fn test_evaluate_stale_challenge_is_expired_even_with_right_code() {
        let now = Utc::now();
        let challenge = ChallengeState::Challenged {
            code: "123456".into(),
            expires_at: now - ChronoDuration::seconds(1),
            attempts: 0,
        };
        assert_eq!(
            evaluate(&challenge, "123456", now, 3),
            VerifyDecision::Expired
        );
    }

    #[test]
    fn test_evaluate_exhausted_before_comparing() {
        let now = Utc::now();
        let challenge = ChallengeState::Challenged {
            code: "123456".into(),
            expires_at: now + ChronoDuration::minutes(5),
            attempts: 3,
        };
        // Correct code, but the counter is spent.
        assert_eq!(
            evaluate(&challenge, "123456", now, 3),
            VerifyDecision::Exhausted
        );
    }

    #[test]
    fn test_evaluate_mismatch_and_match() {
        let now = Utc::now();
        let challenge = ChallengeState::Challenged {
            code: "123456".into(),
            expires_at: now + ChronoDuration::minutes(5),
            attempts: 2,
        };
        assert_eq!(
            evaluate(&challenge, "000000", now, 3),
            VerifyDecision::Mismatch
        );
        assert_eq!(evaluate(&challenge, "123456", now, 3), VerifyDecision::Match);
    }

    #[test]
    fn test_challenge_state_decoding() {
        let now = Utc::now();
        let mut row = registration::Model {
            id: 1,
            first_name: "A".into(),
            last_name: "B".into(),
            council_reg_no: None,
            member_number: None,
            phone: "9876543210".into(),
            email: None,
            address: None,
            district: None,
            membership_type: entity::registration::MembershipType::Annual,
            payment_status: "paid".into(),
            payment_reference: None,
            source: entity::registration::RegistrationSource::Admin,
            status: "verified".into(),
            otp_code: None,
            otp_expires_at: None,
            otp_attempts: 0,
            verification_token: "t".into(),
            created_at: now,
            updated_at: now,
        };

        assert_eq!(ChallengeState::of(&row), ChallengeState::NoChallenge);

        row.otp_code = Some("004821".into());
        row.otp_expires_at = Some(now);
        row.otp_attempts = 1;
        assert_eq!(
            ChallengeState::of(&row),
            ChallengeState::Challenged {
                code: "004821".into(),
                expires_at: now,
                attempts: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_throttle_blocks_within_interval() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let throttle = IssueThrottle::with_clock(Duration::from_secs(60), clock.clone());

        throttle.check_and_stamp(42).await.unwrap();

        clock.advance(ChronoDuration::seconds(30));
        let err = throttle.check_and_stamp(42).await.unwrap_err();
        assert!(matches!(err, ApiError::TooManyRequests));

        // A different registration is unaffected.
        throttle.check_and_stamp(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_throttle_clears_after_interval() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let throttle = IssueThrottle::with_clock(Duration::from_secs(60), clock.clone());

        throttle.check_and_stamp(42).await.unwrap();

        clock.advance(ChronoDuration::seconds(61));
        throttle.check_and_stamp(42).await.unwrap();
    }
}

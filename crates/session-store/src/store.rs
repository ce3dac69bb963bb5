//! Session map with TTL expiration.

use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Entry in the session store with expiration tracking.
struct SessionEntry {
    verified_registration_id: Option<i32>,
    expires_at: Instant,
}

/// In-memory session store with automatic TTL expiration.
///
/// Tokens are opaque random hex strings. Expired sessions are rejected on
/// read and swept by a background task.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

/// Mint a fresh opaque session token (32 hex chars).
pub fn mint_token() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl SessionStore {
    /// Create a new session store.
    ///
    /// Spawns a background task to periodically sweep expired sessions.
    pub fn new(ttl: Duration) -> Self {
        let store = Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!("Session store initialized (ttl={:?})", ttl);

        store
    }

    async fn cleanup_loop(&self) {
        let cleanup_interval = Duration::from_secs(60);

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let now = Instant::now();
            let mut sessions = self.sessions.write().await;
            let before_count = sessions.len();

            sessions.retain(|_, entry| entry.expires_at > now);

            let removed = before_count - sessions.len();
            if removed > 0 {
                debug!("Swept {} expired sessions", removed);
            }
        }
    }

    /// Registration id the session has verified, if any.
    ///
    /// Reading a live session renews its expiry.
    pub async fn verified_registration(&self, token: &str) -> Option<i32> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let entry = sessions.get_mut(token).filter(|e| e.expires_at > now)?;
        entry.expires_at = now + self.ttl;
        entry.verified_registration_id
    }

    /// Record a successful OTP verification for `registration_id`.
    ///
    /// Reuses the caller's token when it names a live session, otherwise
    /// mints a new one. Any previously verified id is overwritten.
    pub async fn grant(&self, token: Option<&str>, registration_id: i32) -> String {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let expires_at = now + self.ttl;

        let token = match token {
            Some(t) if sessions.get(t).is_some_and(|e| e.expires_at > now) => t.to_string(),
            _ => mint_token(),
        };

        sessions.insert(
            token.clone(),
            SessionEntry {
                verified_registration_id: Some(registration_id),
                expires_at,
            },
        );

        debug!(registration_id, "Session granted");
        token
    }

    /// Drop a session outright.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        let now = Instant::now();
        sessions.values().filter(|e| e.expires_at > now).count()
    }
}
